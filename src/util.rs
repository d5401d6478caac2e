#[macro_export]
macro_rules! ok_or_continue {
    ( $e:expr ) => {
        match $e {
            Ok(value) => value,
            Err(_e) => {
                continue;
            }
        }
    };
}

/// Case-insensitive substring match, the way devices are found by port name.
pub fn name_matches(port_name: &str, keyword: &str) -> bool {
    port_name.to_lowercase().contains(&keyword.to_lowercase())
}
