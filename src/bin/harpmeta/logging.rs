use std::io::{IsTerminal, Write};

use log::Level;
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

use crate::arguments::{CliArgs, ColorOption};

/// Writes log records to stderr, prefixed with the binary name and a colored
/// level label. Stdout is reserved for the resolved metadata.
struct CliLogger {
    stderr: BufferWriter,
}

impl CliLogger {
    fn new(choice: ColorChoice) -> CliLogger {
        let choice = match choice {
            ColorChoice::Auto if !std::io::stderr().is_terminal() => ColorChoice::Never,
            _ => choice,
        };

        Self {
            stderr: BufferWriter::stderr(choice),
        }
    }
}

fn level_label(level: Level) -> (&'static str, Color) {
    match level {
        Level::Error => ("error:", Color::Red),
        Level::Warn => ("warn:", Color::Yellow),
        Level::Info => ("info:", Color::Green),
        Level::Debug => ("debug:", Color::White),
        Level::Trace => ("trace:", Color::Blue),
    }
}

impl log::Log for CliLogger {
    #[inline]
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        if record.args().as_str().is_some_and(|args| args.is_empty()) {
            return;
        }

        let (label, color) = level_label(record.level());

        let mut buffer = self.stderr.buffer();
        let _ = write!(buffer, "{}: ", env!("CARGO_BIN_NAME"));
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
        let _ = write!(buffer, "{label}");
        let _ = buffer.reset();

        if record.level() >= Level::Debug {
            let _ = writeln!(buffer, " [{}] {}", record.target(), record.args());
        } else {
            let _ = writeln!(buffer, " {}", record.args());
        }

        let _ = self.stderr.print(&buffer);
    }

    fn flush(&self) {}
}

/// Sets up logging for the cli
pub fn setup_logger(args: &CliArgs) -> anyhow::Result<()> {
    let color_allowed = std::env::var("TERM")
        .ok()
        .is_none_or(|term| !term.eq_ignore_ascii_case("dumb"))
        && std::env::var_os("NO_COLOR").is_none();

    let choice = match args.color {
        ColorOption::Auto if color_allowed => args.color.into(),
        ColorOption::Auto => ColorChoice::Never,
        other => other.into(),
    };

    log::set_boxed_logger(Box::new(CliLogger::new(choice)))
        .map(|()| log::set_max_level(args.verbose.log_level_filter()))?;

    Ok(())
}
