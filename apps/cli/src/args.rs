use std::path::PathBuf;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub port: Option<u16>,
    pub data_dir: Option<PathBuf>,
    pub help: bool,
}

pub fn parse_args<I>(args: I) -> Result<CliArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut parsed = CliArgs::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--port" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --port".to_string())?;
                let port = value
                    .parse::<u16>()
                    .map_err(|_| format!("invalid port value: {value}"))?;
                parsed.port = Some(port);
            }
            "--data-dir" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --data-dir".to_string())?;
                parsed.data_dir = Some(PathBuf::from(value));
            }
            "--help" | "-h" => {
                parsed.help = true;
            }
            _ => {
                return Err(format!("unknown argument: {arg}"));
            }
        }
    }

    Ok(parsed)
}

pub fn print_help() {
    println!(
        "Revisent dashboard backend\n\n\
Usage:\n  revisent [--port <port>] [--data-dir <dir>]\n\n\
Options:\n  --port <port>     Override the configured port for this run only\n  --data-dir <dir>  Store the database and impact defaults in <dir>\n  -h, --help        Show this help message\n"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(values: &[&str]) -> Result<CliArgs, String> {
        parse_args(values.iter().map(|value| value.to_string()))
    }

    #[test]
    fn parses_port_and_data_dir() {
        let args = parse(&["--port", "4000", "--data-dir", "/tmp/revisent"]).expect("args");
        assert_eq!(args.port, Some(4000));
        assert_eq!(args.data_dir, Some(PathBuf::from("/tmp/revisent")));
        assert!(!args.help);
    }

    #[test]
    fn rejects_bad_port_and_unknown_flags() {
        assert!(parse(&["--port", "http"]).is_err());
        assert!(parse(&["--port"]).is_err());
        assert!(parse(&["--no-open"]).is_err());
    }

    #[test]
    fn recognizes_help() {
        assert!(parse(&["-h"]).expect("args").help);
    }
}
