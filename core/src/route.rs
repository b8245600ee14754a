use alloc::format;
use alloc::string::String;

use crate::*;

/// Screens reachable by path, e.g. `/reference/quartz` or `/toolshed?mineral=garnet`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Home,
    /// Practice session, optionally starting on a chosen mineral.
    ToolShed { mineral: Option<String> },
    Shop,
    Reference,
    MineralDetail(String),
}

impl Route {
    /// Unknown paths resolve to [`Route::Home`]. A leading `#` is ignored.
    pub fn parse(path: &str) -> Self {
        let path = path.trim().trim_start_matches('#');
        let (path, query) = path.split_once('?').unwrap_or((path, ""));
        let mut segments = path.split('/').filter(|segment| !segment.is_empty());

        match (segments.next(), segments.next(), segments.next()) {
            (None, ..) => Self::Home,
            (Some("toolshed"), None, _) => Self::ToolShed {
                mineral: query_param(query, "mineral").map(String::from),
            },
            (Some("shop"), None, _) => Self::Shop,
            (Some("reference"), None, _) => Self::Reference,
            (Some("reference"), Some(id), None) => Self::MineralDetail(id.into()),
            _ => {
                log::debug!("unknown route {path:?}, going home");
                Self::Home
            }
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".into(),
            Self::ToolShed { mineral: None } => "/toolshed".into(),
            Self::ToolShed {
                mineral: Some(mineral),
            } => format!("/toolshed?mineral={mineral}"),
            Self::Shop => "/shop".into(),
            Self::Reference => "/reference".into(),
            Self::MineralDetail(id) => format!("/reference/{id}"),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Rockhound",
            Self::ToolShed { .. } => "Tool Shed",
            Self::Shop => "Mining Shop",
            Self::Reference => "Mineral Reference",
            Self::MineralDetail(_) => "Mineral Details",
        }
    }
}

fn query_param<'a>(query: &'a str, name: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// What the detail screen shows for a requested id.
#[derive(Clone, Debug, PartialEq)]
pub enum DetailView<'a> {
    Found(&'a Mineral),
    NotFound(String),
}

impl<'a> DetailView<'a> {
    pub fn resolve(catalog: &'a Catalog, id: &str) -> Self {
        match catalog.get_by_id(id) {
            Some(mineral) => Self::Found(mineral),
            None => {
                log::warn!("No mineral with id {id:?}");
                Self::NotFound(id.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_screen() {
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("#/"), Route::Home);
        assert_eq!(Route::parse("/shop"), Route::Shop);
        assert_eq!(Route::parse("#/reference"), Route::Reference);
        assert_eq!(
            Route::parse("/reference/rose-quartz"),
            Route::MineralDetail("rose-quartz".into())
        );
        assert_eq!(
            Route::parse("/toolshed"),
            Route::ToolShed { mineral: None }
        );
        assert_eq!(
            Route::parse("#/toolshed?mineral=garnet"),
            Route::ToolShed {
                mineral: Some("garnet".into())
            }
        );
    }

    #[test]
    fn unknown_paths_go_home() {
        assert_eq!(Route::parse("/mines/of/moria"), Route::Home);
        assert_eq!(Route::parse("/reference/quartz/extra"), Route::Home);
        assert_eq!(Route::parse("/toolshed?mineral="), Route::ToolShed { mineral: None });
    }

    #[test]
    fn paths_parse_back() {
        for route in [
            Route::Home,
            Route::Shop,
            Route::Reference,
            Route::MineralDetail("gold".into()),
            Route::ToolShed { mineral: None },
            Route::ToolShed {
                mineral: Some("opal".into()),
            },
        ] {
            assert_eq!(Route::parse(&route.to_path()), route);
        }
    }

    #[test]
    fn detail_view_handles_missing_minerals() {
        let catalog = Catalog::builtin().unwrap();

        assert!(matches!(
            DetailView::resolve(&catalog, "diamond"),
            DetailView::Found(mineral) if mineral.name == "Diamond"
        ));
        assert_eq!(
            DetailView::resolve(&catalog, "kryptonite"),
            DetailView::NotFound("kryptonite".into())
        );
    }
}
