use crate::err::ConfigError;
use crate::fallback::{BrowseFallback, Fallback};
use crate::mapper::StringMapper;
use crate::opt::{Options, Target};
use crate::table::{Destination, Mapping, MappingTable};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

/// Everything the server needs, validated and fixed before the first request.
pub struct Config {
    pub port: u16,
    pub hostname: Option<String>,
    pub mappings: Arc<MappingTable>,
    pub fallback: Option<Box<dyn Fallback>>,
}

impl Config {
    pub fn from_options(options: Options) -> Result<Self, ConfigError> {
        let Options {
            verbose: _,
            port,
            hostname,
            from,
            to,
            browse,
        } = options;

        let mappings = Arc::new(zip_rules(from, to)?);
        let fallback: Option<Box<dyn Fallback>> = if browse {
            Some(Box::new(BrowseFallback::new(Arc::clone(&mappings))))
        } else {
            None
        };

        Ok(Self {
            port,
            hostname,
            mappings,
            fallback,
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

fn zip_rules(from: Vec<String>, to: Vec<Target>) -> Result<MappingTable, ConfigError> {
    if from.len() != to.len() {
        return Err(ConfigError::MismatchedRules {
            from: from.len(),
            to: to.len(),
        });
    }

    let mappings = from
        .into_iter()
        .zip(to)
        .enumerate()
        .map(|(index, (pattern, target))| {
            let Target {
                vcs,
                scheme,
                hostname,
                template,
            } = target;
            let mapper = StringMapper::new(&pattern, &template).map_err(|source| {
                ConfigError::Mapping {
                    index,
                    pattern,
                    source,
                }
            })?;
            Ok(Mapping {
                destination: Destination {
                    vcs,
                    scheme,
                    hostname,
                },
                mapper,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MappingTable::new(mappings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::MapError;
    use clap::Parser;

    fn options(args: &[&str]) -> Options {
        let args = std::iter::once("vanity").chain(args.iter().copied());
        Options::try_parse_from(args).unwrap()
    }

    #[test]
    fn builds_table_in_order() {
        let config = Config::from_options(options(&[
            "-f",
            "/hg/(?P<repo>[^/]+)",
            "-t",
            "hg+https://bitbucket.org/me/{{repo}}",
            "-f",
            "/(?P<owner>[^/]+)/(?P<repo>[^/]+)",
            "-t",
            "https://github.com/{{owner}}/{{repo}}",
        ]))
        .unwrap();

        let any: SocketAddr = "0.0.0.0:80".parse().unwrap();
        assert_eq!(config.listen_addr(), any);
        assert!(config.fallback.is_none());
        let patterns = config
            .mappings
            .iter()
            .map(|m| m.mapper.pattern())
            .collect::<Vec<_>>();
        assert_eq!(
            patterns,
            ["/hg/(?P<repo>[^/]+)", "/(?P<owner>[^/]+)/(?P<repo>[^/]+)"]
        );

        let redirect = config.mappings.resolve("h", "/hg/x").unwrap();
        assert_eq!(redirect.vcs, "hg");
        assert_eq!(redirect.redirect_root, "https://bitbucket.org/me/x");
    }

    #[test]
    fn browse_installs_fallback() {
        let config = Config::from_options(options(&[
            "--browse",
            "-p",
            "8080",
            "-f",
            "/x",
            "-t",
            "https://e.com/y",
        ]))
        .unwrap();
        assert!(config.fallback.is_some());
        assert_eq!(config.listen_addr().port(), 8080);
    }

    #[test]
    fn mismatched_rules() {
        let args = ["-f", "/a", "-f", "/b", "-t", "https://e.com"];
        let err = Config::from_options(options(&args)).err().unwrap();
        assert!(matches!(err, ConfigError::MismatchedRules { from: 2, to: 1 }));
    }

    #[test]
    fn invalid_pattern_aborts() {
        let err = Config::from_options(options(&[
            "-f",
            "/ok",
            "-t",
            "https://e.com",
            "-f",
            "/(?P<owner>.+",
            "-t",
            "https://e.com/{{owner}}",
        ]))
        .err()
        .unwrap();
        assert!(matches!(
            err,
            ConfigError::Mapping {
                index: 1,
                source: MapError::InvalidPattern(_),
                ..
            }
        ));
    }
}
