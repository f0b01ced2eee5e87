//! The fixed mapping between configuration keys and `usb_modeswitch`
//! command-line options.

/// Recognized configuration keys and the long option each one maps to.
///
/// This table is a compatibility contract with the external tool; the
/// spellings on both sides must match it exactly. Lookup is
/// case-sensitive, so `huaweimode` is not a recognized key.
pub const OPTION_FLAGS: &[(&str, &str)] = &[
    ("DefaultVendor", "--default-vendor"),
    ("DefaultProduct", "--default-product"),
    ("TargetVendor", "--target-vendor"),
    ("TargetProduct", "--target-product"),
    ("TargetClass", "--target-class"),
    ("MessageEndpoint", "--message-endpoint"),
    ("MessageContent", "--message-content"),
    ("ResponseEndpoint", "--response-endpoint"),
    ("DetachStorageOnly", "--detach-only"),
    ("HuaweiMode", "--huawei-mode"),
    ("SierraMode", "--sierra-mode"),
    ("SonyMode", "--sony-mode"),
    ("ResetUSB", "--reset-usb"),
    ("Interface", "--interface"),
    ("Configuration", "--configuration"),
    ("AltSetting", "--altsetting"),
];

/// Return the command-line option for a recognized key.
pub fn flag_for(key: &str) -> Option<&'static str> {
    OPTION_FLAGS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, flag)| *flag)
}

/// Whether `key` is one of the recognized configuration keys.
pub fn is_recognized(key: &str) -> bool {
    flag_for(key).is_some()
}
