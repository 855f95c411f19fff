//! Storage profile domain types

wire_enum! {
    /// Operating system family a storage profile applies to
    OsFamily {
        Windows => "WINDOWS",
        Linux => "LINUX",
        Macos => "MACOS",
    }
}
