#[cfg(test)]
#[allow(clippy::module_inception)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use crate::{By, Data, Delegate, DelegateError, Direction, OrderError, Page, PageError};

    const MAPPINGS: &[(&str, &str)] = &[("user_id", "user_id"), ("name", "name")];

    fn default_order() -> By {
        By::new("user_id", Direction::Asc)
    }

    #[test]
    fn test_order_parse_blank_uses_default() {
        let by = By::parse(MAPPINGS, "  ", default_order()).expect("parse");
        assert_eq!(by, default_order());
    }

    #[test]
    fn test_order_parse_field_only_is_ascending() {
        let by = By::parse(MAPPINGS, "name", default_order()).expect("parse");
        assert_eq!(by, By::new("name", Direction::Asc));
    }

    #[test]
    fn test_order_parse_with_direction() {
        let by = By::parse(MAPPINGS, "name, DESC", default_order()).expect("parse");
        assert_eq!(by.field, "name");
        assert_eq!(by.direction, Direction::Desc);
        assert_eq!(by.to_string(), "name,DESC");
    }

    #[test]
    fn test_order_parse_unknown_field() {
        let result = By::parse(MAPPINGS, "password_hash,ASC", default_order());
        assert_eq!(
            result,
            Err(OrderError::UnknownField("password_hash".to_string()))
        );
    }

    #[test]
    fn test_order_parse_unknown_direction() {
        let result = By::parse(MAPPINGS, "name,sideways", default_order());
        assert_eq!(
            result,
            Err(OrderError::UnknownDirection("sideways".to_string()))
        );
    }

    #[test]
    fn test_order_parse_too_many_parts() {
        let result = By::parse(MAPPINGS, "name,ASC,DESC", default_order());
        assert!(matches!(result, Err(OrderError::UnknownField(_))));
    }

    #[test]
    fn test_page_parse_defaults() {
        let page = Page::parse("", "", 10, 100).expect("parse");
        assert_eq!(page.number(), 1);
        assert_eq!(page.rows_per_page(), 10);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_page_parse_offset() {
        let page = Page::parse("3", "20", 10, 100).expect("parse");
        assert_eq!(page.offset(), 40);
    }

    #[test]
    fn test_page_parse_rejects_bad_input() {
        assert!(matches!(
            Page::parse("abc", "10", 10, 100),
            Err(PageError::InvalidNumber(_))
        ));
        assert!(matches!(
            Page::parse("1", "-1", 10, 100),
            Err(PageError::InvalidRows(_))
        ));
        assert_eq!(
            Page::parse("1", "101", 10, 100),
            Err(PageError::RowsTooLarge { max: 100 })
        );
        assert_eq!(Page::parse("0", "10", 10, 100), Err(PageError::NumberTooSmall));
        assert_eq!(Page::parse("1", "0", 10, 100), Err(PageError::RowsTooSmall));
    }

    fn data(domain: &str, action: &str) -> Data {
        Data {
            domain: domain.to_string(),
            action: action.to_string(),
            raw_params: serde_json::json!({ "id": 7 }),
        }
    }

    #[tokio::test]
    async fn test_delegate_runs_handlers_in_order() {
        let delegate = Delegate::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second"] {
            let seen = seen.clone();
            delegate.register("user", "deleted", move |d: Data| {
                let seen = seen.clone();
                async move {
                    seen.lock().push(format!("{tag}:{}", d.raw_params["id"]));
                    anyhow::Ok(())
                }
            });
        }

        delegate.call(data("user", "deleted")).await.expect("call");
        assert_eq!(*seen.lock(), vec!["first:7", "second:7"]);
    }

    #[tokio::test]
    async fn test_delegate_without_handlers_is_ok() {
        let delegate = Delegate::new();
        delegate.call(data("product", "deleted")).await.expect("call");
    }

    #[tokio::test]
    async fn test_delegate_first_failure_stops_the_call() {
        let delegate = Delegate::new();
        let reached = Arc::new(Mutex::new(false));

        delegate.register("user", "deleted", |_| async { Err::<(), _>(anyhow::anyhow!("subscriber down")) });
        let flag = reached.clone();
        delegate.register("user", "deleted", move |_| {
            let flag = flag.clone();
            async move {
                *flag.lock() = true;
                anyhow::Ok(())
            }
        });

        let err = delegate
            .call(data("user", "deleted"))
            .await
            .expect_err("handler failure must surface");
        match &err {
            DelegateError::Handler { domain, action, .. } => {
                assert_eq!(domain, "user");
                assert_eq!(action, "deleted");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("subscriber down"));
        assert!(!*reached.lock());
    }
}
