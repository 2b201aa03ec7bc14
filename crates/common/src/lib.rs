pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_serializes_to_ok() {
        let h = types::Health::ok();
        assert_eq!(serde_json::to_string(&h).unwrap(), r#"{"status":"ok"}"#);
    }
}
