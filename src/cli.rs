use clap::Parser;

use crate::config::{get_config_dir, get_data_dir};

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    /// Tick rate, i.e. number of ticks per second
    #[arg(short, long, value_name = "FLOAT", default_value_t = 4.0)]
    pub tick_rate: f64,

    /// Frame rate, i.e. number of frames per second
    #[arg(short, long, value_name = "FLOAT", default_value_t = 60.0)]
    pub frame_rate: f64,

    /// Capture mouse clicks (needed for the calendar)
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub mouse: bool,
}

const VERSION_MESSAGE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "-",
    env!("VERGEN_BUILD_DATE"),
);

pub fn version() -> String {
    let author = clap::crate_authors!();
    let git_describe = option_env!("VERGEN_GIT_DESCRIBE").unwrap_or("unknown");

    let config_dir_path = get_config_dir().display().to_string();
    let data_dir_path = get_data_dir().display().to_string();

    format!(
        "\
{VERSION_MESSAGE} ({git_describe})

Authors: {author}

Config directory: {config_dir_path}
Data directory: {data_dir_path}"
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_match_the_terminal_runtime() {
        let cli = Cli::parse_from(["signal-lab"]);
        assert_eq!(cli.tick_rate, 4.0);
        assert_eq!(cli.frame_rate, 60.0);
        assert!(cli.mouse);
    }

    #[test]
    fn rates_and_mouse_can_be_overridden() {
        let cli = Cli::parse_from([
            "signal-lab",
            "-t",
            "10",
            "--frame-rate",
            "30",
            "--mouse",
            "false",
        ]);
        assert_eq!(cli.tick_rate, 10.0);
        assert_eq!(cli.frame_rate, 30.0);
        assert!(!cli.mouse);
    }
}
