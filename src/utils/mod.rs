pub mod url;

#[cfg(test)]
pub mod test_utils;

/// 80-column rule used to frame model listings and streamed responses.
pub fn horizontal_rule() -> String {
    "-".repeat(80)
}
