use crate::mapper::{MapError, StringMapper};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("not a go-get request")]
    NotDiscovery,
    #[error("no mapping found")]
    NoMappingFound,
    #[error("error rendering destination for {pattern:?}: {source}")]
    Render { pattern: String, source: MapError },
}

/// Where a mapped repository actually lives. Echoed verbatim into the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub vcs: String,
    pub scheme: String,
    pub hostname: String,
}

#[derive(Debug)]
pub struct Mapping {
    pub destination: Destination,
    pub mapper: StringMapper,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Redirect<'t> {
    pub root: String,
    pub vcs: &'t str,
    pub redirect_root: String,
    pub tail: String,
}

/// Ordered rewrite rules. The first mapping whose pattern matches a prefix of the path wins.
#[derive(Debug, Default)]
pub struct MappingTable {
    mappings: Vec<Mapping>,
}

impl MappingTable {
    pub fn new(mappings: Vec<Mapping>) -> Self {
        Self { mappings }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mapping> {
        self.mappings.iter()
    }

    pub fn resolve(&self, host: &str, path: &str) -> Result<Redirect<'_>, DispatchError> {
        for Mapping {
            destination,
            mapper,
        } in &self.mappings
        {
            match mapper.map_prefix(path) {
                Ok(mapped) => {
                    return Ok(Redirect {
                        root: format!("{}{}", host, mapped.prefix),
                        vcs: &destination.vcs,
                        redirect_root: format!(
                            "{}://{}{}",
                            destination.scheme, destination.hostname, mapped.path
                        ),
                        tail: mapped.tail.to_string(),
                    });
                }
                Err(MapError::NoPrefixMatch | MapError::NoMatch) => {
                    log::trace!("{} does not match {:?}", path, mapper.pattern());
                }
                Err(e) => {
                    return Err(DispatchError::Render {
                        pattern: mapper.pattern().to_string(),
                        source: e,
                    });
                }
            }
        }
        Err(DispatchError::NoMappingFound)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn mapping(vcs: &str, hostname: &str, pattern: &str, template: &str) -> Mapping {
        Mapping {
            destination: Destination {
                vcs: vcs.to_string(),
                scheme: "https".to_string(),
                hostname: hostname.to_string(),
            },
            mapper: StringMapper::new(pattern, template).unwrap(),
        }
    }

    pub fn advanced_table() -> MappingTable {
        let owner_repo = "/{{.owner}}/{{.repo}}";
        MappingTable::new(vec![
            mapping("git", "github.com", "/customPath", "/path/to/custom"),
            mapping(
                "git",
                "github.com",
                "/repo(?P<repo>.+)/user(?P<owner>.+)",
                owner_repo,
            ),
            mapping(
                "hg",
                "bitbucket.org",
                "/hg/(?P<owner>.+)/(?P<repo>.+)",
                owner_repo,
            ),
            mapping(
                "git",
                "github.com",
                "/(?P<owner>.+)/(?P<repo>.+)\\.git",
                owner_repo,
            ),
            mapping("git", "github.com", "/(?P<owner>.+)/(?P<repo>.+)", owner_repo),
        ])
    }

    fn segments_table() -> MappingTable {
        MappingTable::new(vec![mapping(
            "git",
            "github.com",
            "/(?P<owner>[^/]+)/(?P<repo>[^/]+)",
            "/{{owner}}/{{repo}}",
        )])
    }

    #[test]
    fn resolves_owner_repo() {
        let table = MappingTable::new(vec![mapping(
            "git",
            "github.com",
            "/(?P<owner>.+)/(?P<repo>.+)",
            "/{{owner}}/{{repo}}",
        )]);
        assert_eq!(
            table.resolve("myhost.com", "/owner/repo").unwrap(),
            Redirect {
                root: "myhost.com/owner/repo".to_string(),
                vcs: "git",
                redirect_root: "https://github.com/owner/repo".to_string(),
                tail: String::new(),
            }
        );
    }

    #[test]
    fn prefix_rule_keeps_tail() {
        let table = advanced_table();
        let redirect = table
            .resolve("myhost.com", "/customPath/subpkg/path")
            .unwrap();
        assert_eq!(redirect.root, "myhost.com/customPath");
        assert_eq!(redirect.redirect_root, "https://github.com/path/to/custom");
        assert_eq!(redirect.tail, "/subpkg/path");
    }

    #[test]
    fn first_match_wins() {
        let table = advanced_table();

        let redirect = table.resolve("myhost.com", "/owner/repo.git").unwrap();
        assert_eq!(redirect.root, "myhost.com/owner/repo.git");
        assert_eq!(redirect.redirect_root, "https://github.com/owner/repo");

        let redirect = table.resolve("myhost.com", "/hg/owner/repo").unwrap();
        assert_eq!(redirect.vcs, "hg");
        assert_eq!(redirect.redirect_root, "https://bitbucket.org/owner/repo");
    }

    #[test]
    fn order_changes_result() {
        let mut mappings = segments_table().mappings;
        let owner_only = mapping("hg", "bitbucket.org", "/(?P<owner>[^/]+)", "/{{owner}}");
        mappings.push(owner_only);

        let table = MappingTable::new(mappings);
        let redirect = table.resolve("h", "/a/b").unwrap();
        assert_eq!(redirect.vcs, "git");
        assert_eq!(redirect.redirect_root, "https://github.com/a/b");

        let mut mappings = table.mappings;
        mappings.reverse();
        let table = MappingTable::new(mappings);
        let redirect = table.resolve("h", "/a/b").unwrap();
        assert_eq!(redirect.vcs, "hg");
        assert_eq!(redirect.redirect_root, "https://bitbucket.org/a");
        assert_eq!(redirect.tail, "/b");
    }

    #[test]
    fn no_mapping_found() {
        let table = segments_table();
        assert!(matches!(
            table.resolve("myhost.com", "/unmapped"),
            Err(DispatchError::NoMappingFound)
        ));
        assert!(matches!(
            MappingTable::default().resolve("myhost.com", "/owner/repo"),
            Err(DispatchError::NoMappingFound)
        ));
    }
}
