use super::*;

#[test]
fn test_nested_depth_counting() {
    fn depth(n: u32) -> u32 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
    }

    // Far past what an 8MB main-thread stack survives without growth.
    assert_eq!(depth(200_000), 200_000);
}

#[test]
fn test_propagates_result() {
    let result: Result<u8, String> = ensure_sufficient_stack(|| Err("boom".to_string()));
    assert_eq!(result, Err("boom".to_string()));
}
