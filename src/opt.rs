use clap::{ArgAction, Parser};
use std::str::FromStr;
use thiserror::Error;

/// Serve go-get discovery pages that point vanity import paths at their real repositories
#[derive(Parser, Debug)]
#[clap(version, about)]
pub struct Options {
    /// Logging verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// HTTP listen port (go get only queries port 80/443, other ports are for debugging)
    #[arg(short, long, default_value_t = 80)]
    pub port: u16,

    /// Hostname to report in import roots instead of the request's Host header
    #[arg(long)]
    pub hostname: Option<String>,

    #[arg(
        help = "Source path patterns (--help for more)",
        long_help = r"Source path patterns, as regular expressions:
    - each pattern is checked in order, and the first match is chosen
    - the match must start at the beginning of the path, anything after it is a sub-package
    - named groups are available to the corresponding --to template
Examples:
    - /(?P<owner>[^/]+)/(?P<repo>[^/]+)
    - /hg/(?P<repo>[^/]+)
    - /customPath"
    )]
    #[arg(short, long, required = true, display_order = 0)]
    pub from: Vec<String>,

    #[arg(
        help = "Destination repositories (--help for more)",
        long_help = r"Destination repositories, as [VCS+]SCHEME://HOST[TEMPLATE]:
    - VCS defaults to git
    - {{name}} in the template is replaced by the named group from --from
Examples:
    - git+https://github.com/{{owner}}/{{repo}}
    - hg+https://bitbucket.org/someone/{{repo}}
    - https://github.com/path/to/custom"
    )]
    #[arg(short, long, required = true, display_order = 0, value_parser = Target::from_str)]
    pub to: Vec<Target>,

    /// Redirect requests without go-get=1 (e.g. from browsers) to the destination repository
    #[arg(long)]
    pub browse: bool,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("missing `://` in {0:?}")]
    MissingScheme(String),
    #[error("empty {0} in {1:?}")]
    Empty(&'static str, String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub vcs: String,
    pub scheme: String,
    pub hostname: String,
    pub template: String,
}

impl FromStr for Target {
    type Err = TargetError;

    fn from_str(arg: &str) -> Result<Self, Self::Err> {
        let (kind, rest) = arg
            .split_once("://")
            .ok_or_else(|| TargetError::MissingScheme(arg.to_string()))?;
        let (vcs, scheme) = kind.split_once('+').unwrap_or(("git", kind));
        let (hostname, template) = match rest.find('/') {
            Some(i) => rest.split_at(i),
            None => (rest, ""),
        };

        for (what, value) in [("vcs", vcs), ("scheme", scheme), ("hostname", hostname)] {
            if value.is_empty() {
                return Err(TargetError::Empty(what, arg.to_string()));
            }
        }

        Ok(Self {
            vcs: vcs.to_string(),
            scheme: scheme.to_string(),
            hostname: hostname.to_string(),
            template: template.to_string(),
        })
    }
}
