//! ANSI escape sequences written to transports.
//!
//! These are opaque to the renderer and must stay byte-for-byte identical:
//! raw telnet clients and terminal emulators interpret them directly.

/// Clear the entire screen.
pub const CLEAR: &str = "\x1b[2J";

/// Restore the saved cursor position and clear to end of line.
pub const CLEAR_AND_RESTORE: &str = "\x1b[u\x1b[K";

/// 256-color foreground 51 (light cyan), the session's text color.
pub const FOREGROUND_CYAN: &str = "\x1b[38;5;51m";

/// Reset all attributes. Also the teardown signal sent before a network
/// disconnect.
pub const RESET: &str = "\x1b[0m";

/// Full block used by the identification sweep.
pub const FULL_BLOCK: &str = "\u{2588}";

/// Move the cursor to a zero-based `(row, col)`.
pub fn cursor_to(row: usize, col: usize) -> String {
    format!("\x1b[{};{}f", row + 1, col + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_to_is_one_based() {
        assert_eq!(cursor_to(0, 0), "\x1b[1;1f");
        assert_eq!(cursor_to(4, 9), "\x1b[5;10f");
    }
}
