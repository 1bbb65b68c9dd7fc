//! Terminal mode handling for the full-screen view

use std::io;
use std::panic;

use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, LeaveAlternateScreen};

/// Leave raw mode and the alternate screen. Safe to call when neither is
/// active.
pub fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Chain a panic hook that restores the terminal before the default report
/// is printed. Install before entering raw mode.
pub fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore();
        previous(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_without_raw_mode() {
        assert!(restore().is_ok());
        assert!(restore().is_ok());
    }

    #[test]
    fn test_panic_hook_still_unwinds() {
        install_panic_hook();
        let result = panic::catch_unwind(|| panic!("frame draw failed"));
        assert!(result.is_err());
    }
}
