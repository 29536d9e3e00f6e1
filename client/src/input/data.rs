use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GameAction {
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    Cast,
    Interact,
    CycleSticker,
    ClearCanvas,
    Escape,
    ToggleFps,
    ToggleInspector,
}
