//! Shared validation helpers for inbound HTTP payloads.
//!
//! Malformed identifiers and field values are rejected here, before any
//! storage call happens, with structured details naming the offending field.

use serde_json::{Value, json};

use crate::domain::{Error, GenerateAction, PostContent, PostId, PostStatus};

pub(crate) fn parse_post_id(raw: &str) -> Result<PostId, Error> {
    PostId::parse(raw).map_err(|_| {
        Error::invalid_request("post id must be a valid UUID").with_details(json!({
            "field": "postId",
            "value": raw,
            "code": "invalid_post_id",
        }))
    })
}

pub(crate) fn parse_status(raw: &str) -> Result<PostStatus, Error> {
    raw.parse::<PostStatus>().map_err(|_| {
        Error::invalid_request("status must be DRAFT or PUBLISHED").with_details(json!({
            "field": "status",
            "value": raw,
            "code": "invalid_status",
        }))
    })
}

pub(crate) fn parse_content(value: Value) -> Result<PostContent, Error> {
    PostContent::new(value).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "content",
            "code": "invalid_content_tree",
        }))
    })
}

pub(crate) fn parse_generate_action(raw: &str) -> Result<GenerateAction, Error> {
    raw.parse::<GenerateAction>().map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "action",
            "value": raw,
            "code": "invalid_action",
        }))
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::ErrorCode;

    #[rstest]
    #[case("not-a-uuid")]
    #[case("")]
    #[case("1234")]
    fn malformed_post_ids_are_invalid_requests(#[case] raw: &str) {
        let err = parse_post_id(raw).expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().expect("details present");
        assert_eq!(details["value"], raw);
    }

    #[rstest]
    fn well_formed_post_ids_pass() {
        parse_post_id("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
    }

    #[rstest]
    fn unknown_status_is_an_invalid_request() {
        let err = parse_status("ARCHIVED").expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn malformed_content_names_the_field() {
        let err = parse_content(json!({ "root": [] })).expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details().expect("details present")["field"],
            "content"
        );
    }

    #[rstest]
    fn unknown_action_reports_the_original_message() {
        let err = parse_generate_action("bogus").expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "Invalid action type");
    }
}
