// Copyright (c) 2026 rezky_nightky

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Mono,
    Ansi8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Quit,
    ToggleThunderstorm,
    Resize(u16, u16),
}
