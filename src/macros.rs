//! The `plist!` macro for building [`PlistValue`](crate::PlistValue)
//! trees inline.

/// Builds a [`PlistValue`](crate::PlistValue) from literal syntax.
///
/// Dictionaries use `{ "key": value, ... }` with string-literal keys,
/// arrays use `[value, ...]`, and every other expression goes through
/// `PlistValue::from`, so booleans, integers, `f32` reals, strings, and
/// `DateTime<Utc>` all work as leaves.
///
/// # Examples
///
/// ```rust
/// use wifi_qr::plist;
///
/// let value = plist!({
///     "SSID_STR": "home",
///     "HIDDEN_NETWORK": false,
///     "Channels": [1, 6, 11]
/// });
/// assert!(value.is_dict());
/// ```
#[macro_export]
macro_rules! plist {
    (true) => {
        $crate::PlistValue::Bool(true)
    };

    (false) => {
        $crate::PlistValue::Bool(false)
    };

    ([]) => {
        $crate::PlistValue::Array(vec![])
    };

    ([ $($element:tt),+ $(,)? ]) => {
        $crate::PlistValue::Array(vec![$($crate::plist!($element)),+])
    };

    ({}) => {
        $crate::PlistValue::Dict($crate::PlistDict::new())
    };

    ({ $($key:literal : $value:tt),+ $(,)? }) => {{
        let mut dict = $crate::PlistDict::new();
        $(
            dict.insert($key, $crate::plist!($value));
        )+
        $crate::PlistValue::Dict(dict)
    }};

    // Fallback: any expression with a `From<_> for PlistValue` impl.
    ($other:expr) => {
        $crate::PlistValue::from($other)
    };
}
