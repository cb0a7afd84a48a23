//! `/apps/:id` 라우트 규약

/// 마이크로 프론트엔드 라우트 접두사
pub const APP_ROUTE_PREFIX: &str = "/apps/";

/// ID에 대한 기본 라우트
pub fn app_route(id: &str) -> String {
    format!("{}{}", APP_ROUTE_PREFIX, id)
}

/// 경로에서 `:id` 파라미터 추출
///
/// `/apps/` 아래가 아니면 `None`. 쿼리/프래그먼트와 끝의 `/`는 무시하며,
/// 파라미터가 비어 있으면 `Some("")`을 돌려줍니다 (로더가 `InvalidRequest`로 처리).
pub fn parse_app_route(path: &str) -> Option<&str> {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let rest = match path.strip_prefix(APP_ROUTE_PREFIX) {
        Some(rest) => rest,
        None if path == APP_ROUTE_PREFIX.trim_end_matches('/') => "",
        None => return None,
    };

    let id = rest.trim_end_matches('/');
    if id.contains('/') {
        return None;
    }
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_app_route() {
        assert_eq!(parse_app_route("/apps/job-board"), Some("job-board"));
        assert_eq!(parse_app_route("/apps/job-board/"), Some("job-board"));
        assert_eq!(parse_app_route("/apps/job-board?tab=saved"), Some("job-board"));
        assert_eq!(parse_app_route("/apps/"), Some(""));
        assert_eq!(parse_app_route("/apps"), Some(""));
        assert_eq!(parse_app_route("/apps/a/b"), None);
        assert_eq!(parse_app_route("/dashboard"), None);
    }

    #[test]
    fn test_app_route() {
        assert_eq!(app_route("stories"), "/apps/stories");
        assert_eq!(parse_app_route(&app_route("stories")), Some("stories"));
    }
}
