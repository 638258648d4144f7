use serde::Deserialize;

#[derive(Deserialize)]
pub struct PaginationParams {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl PaginationParams {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_params_are_missing() {
        let params = PaginationParams {
            offset: None,
            limit: None,
        };
        assert_eq!(params.offset(), 0);
        assert_eq!(params.limit(), 10);
    }

    #[test]
    fn limit_is_clamped() {
        let params = PaginationParams {
            offset: Some(-3),
            limit: Some(500),
        };
        assert_eq!(params.offset(), 0);
        assert_eq!(params.limit(), 50);

        let params = PaginationParams {
            offset: Some(20),
            limit: Some(0),
        };
        assert_eq!(params.offset(), 20);
        assert_eq!(params.limit(), 1);
    }
}
