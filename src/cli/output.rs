#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Color behavior from the config's `settings.color`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorPolicy {
    /// Color when stdout is a tty and `NO_COLOR` is unset.
    Auto,
    /// Color unconditionally (piped output included).
    Always,
    /// Never color.
    Never,
}

impl ColorPolicy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "auto" => Some(ColorPolicy::Auto),
            "always" => Some(ColorPolicy::Always),
            "never" => Some(ColorPolicy::Never),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub pretty: bool,
    pub use_color: bool,
    pub verbose: bool,
}

/// Decide whether to emit ANSI colors. `--no-color` wins over everything;
/// `Always` skips the tty and `NO_COLOR` probes.
pub fn detect_color(policy: ColorPolicy, no_color_flag: bool) -> bool {
    if no_color_flag {
        return false;
    }
    match policy {
        ColorPolicy::Never => false,
        ColorPolicy::Always => true,
        ColorPolicy::Auto => {
            if std::env::var("NO_COLOR").is_ok() {
                return false;
            }
            atty_stdout()
        }
    }
}

fn atty_stdout() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}
