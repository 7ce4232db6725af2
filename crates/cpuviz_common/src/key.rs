/// Frontend-neutral keys understood by the visualizer.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Key {
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Q,
    W,
    E,
    R,
    A,
    S,
    D,
    F,
    Up,
    Down,
    Enter,
    Backspace,
    Escape,
    None,
}

impl Key {
    /// Zero-based slot for the number row, if this is one of `Num1..=Num6`.
    pub fn number_slot(self) -> Option<usize> {
        match self {
            Key::Num1 => Some(0),
            Key::Num2 => Some(1),
            Key::Num3 => Some(2),
            Key::Num4 => Some(3),
            Key::Num5 => Some(4),
            Key::Num6 => Some(5),
            _ => None,
        }
    }
}
