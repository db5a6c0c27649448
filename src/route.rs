use std::fmt;

use crate::error::{AppError, Result};

const DETAIL_PREFIX: &str = "/repositorio/";

/// The two screens and how to address them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    RepoList,
    /// `/repositorio/:repositorio`, holding the decoded `owner/name`
    RepoDetail(String),
}

impl Route {
    pub fn detail(full_name: impl Into<String>) -> Self {
        Route::RepoDetail(full_name.into())
    }

    pub fn parse(path: &str) -> Result<Self> {
        let path = path.trim();
        if path.is_empty() || path == "/" {
            return Ok(Route::RepoList);
        }

        let Some(segment) = path.strip_prefix(DETAIL_PREFIX) else {
            return Err(AppError::Route(path.to_string()));
        };

        // A path parameter is exactly one segment; the slash in `owner/name`
        // must arrive encoded.
        let segment = segment.strip_suffix('/').unwrap_or(segment);
        if segment.is_empty() || segment.contains('/') {
            return Err(AppError::Route(path.to_string()));
        }

        let decoded =
            urlencoding::decode(segment).map_err(|_| AppError::Route(path.to_string()))?;
        Ok(Route::RepoDetail(decoded.into_owned()))
    }

    pub fn path(&self) -> String {
        match self {
            Route::RepoList => "/".to_string(),
            Route::RepoDetail(name) => format!("{}{}", DETAIL_PREFIX, urlencoding::encode(name)),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_list() {
        assert_eq!(Route::parse("/").unwrap(), Route::RepoList);
        assert_eq!(Route::parse("").unwrap(), Route::RepoList);
    }

    #[test]
    fn detail_segment_is_decoded() {
        assert_eq!(
            Route::parse("/repositorio/facebook%2Freact").unwrap(),
            Route::detail("facebook/react")
        );
    }

    #[test]
    fn detail_trailing_slash_allowed() {
        assert_eq!(
            Route::parse("/repositorio/a%2Fb/").unwrap(),
            Route::detail("a/b")
        );
    }

    #[test]
    fn detail_path_encodes_name() {
        assert_eq!(
            Route::detail("facebook/react").path(),
            "/repositorio/facebook%2Freact"
        );
        assert_eq!(Route::RepoList.to_string(), "/");
    }

    #[test]
    fn path_and_parse_are_inverse() {
        let route = Route::detail("rust-lang/rust.vim");
        assert_eq!(Route::parse(&route.path()).unwrap(), route);
    }

    #[test]
    fn unencoded_slash_is_rejected() {
        assert!(matches!(
            Route::parse("/repositorio/facebook/react"),
            Err(AppError::Route(_))
        ));
    }

    #[test]
    fn unknown_paths_rejected() {
        assert!(Route::parse("/repos").is_err());
        assert!(Route::parse("/repositorio/").is_err());
    }
}
