#[cfg(test)]
pub mod test {
    use confique::Config;
    use serde::{Deserialize, Serialize};

    use crate::field::{Bind, Binding};

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct TestConfig {
        /// The application host.
        #[config(default = "localhost")]
        pub host: String,

        /// The port number.
        #[config(default = 8080)]
        pub port: u16,

        /// Enable debug mode.
        #[config(default = false)]
        pub debug: bool,

        /// Database settings.
        #[config(nested)]
        pub database: TestDbConfig,
    }

    #[derive(Config, Serialize, Deserialize, Debug, PartialEq)]
    pub struct TestDbConfig {
        /// Connection string URL.
        pub url: Option<String>,

        /// Connection pool size.
        #[config(default = 5)]
        pub pool_size: usize,
    }

    #[test]
    fn test_config_loads_defaults() {
        let config = TestConfig::builder().load().unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 8080);
        assert!(!config.debug);
        assert_eq!(config.database.url, None);
        assert_eq!(config.database.pool_size, 5);
    }

    // -- Binding targets ------------------------------------------------------

    /// One field of every bindable kind, each under its own key.
    #[derive(Debug, Default)]
    pub struct AllKinds {
        pub string: String,
        pub boolean: bool,
        pub int8: i8,
        pub int16: i16,
        pub int32: i32,
        pub int64: i64,
        pub int: isize,
        pub uint8: u8,
        pub uint16: u16,
        pub uint32: u32,
        pub uint64: u64,
        pub uint: usize,
        pub string_slice: Vec<String>,
        pub int_slice: Vec<i64>,
    }

    impl Bind for AllKinds {
        fn bindings(&mut self) -> Vec<Binding<'_>> {
            crate::bindings!(self {
                string: key = "string";
                boolean: key = "bool";
                int8: key = "int8";
                int16: key = "int16";
                int32: key = "int32";
                int64: key = "int64";
                int: key = "int";
                uint8: key = "uint8";
                uint16: key = "uint16";
                uint32: key = "uint32";
                uint64: key = "uint64";
                uint: key = "uint";
                string_slice: key = "string-slice";
                int_slice: key = "int-slice";
            })
        }
    }

    /// Fields whose kinds can be declared but never bound.
    #[derive(Debug, Default)]
    pub struct UnsupportedKinds {
        pub ratio: f64,
        pub letter: char,
        pub maybe: Option<String>,
        pub ignored: f32,
    }

    impl Bind for UnsupportedKinds {
        fn bindings(&mut self) -> Vec<Binding<'_>> {
            crate::bindings!(self {
                ratio: key = "ratio";
                letter: key = "letter";
                maybe: key = "maybe";
                ignored;
            })
        }
    }

    #[derive(Debug, Default)]
    pub struct KeyedValue {
        pub value: String,
    }

    impl Bind for KeyedValue {
        fn bindings(&mut self) -> Vec<Binding<'_>> {
            crate::bindings!(self { value: key = "config" })
        }
    }

    #[derive(Debug, Default)]
    pub struct FlaggedValue {
        pub value: String,
    }

    impl Bind for FlaggedValue {
        fn bindings(&mut self) -> Vec<Binding<'_>> {
            crate::bindings!(self { value: flag = "flag", key = "config" })
        }
    }

    #[derive(Debug, Default)]
    pub struct FlagOnly {
        pub value: String,
    }

    impl Bind for FlagOnly {
        fn bindings(&mut self) -> Vec<Binding<'_>> {
            crate::bindings!(self { value: flag = "value" })
        }
    }

    #[derive(Debug, Default)]
    pub struct Untagged {
        pub value: String,
        pub count: i32,
    }

    impl Bind for Untagged {
        fn bindings(&mut self) -> Vec<Binding<'_>> {
            crate::bindings!(self { value; count })
        }
    }

    /// A bindable field, then an unsupported one, then another bindable one.
    #[derive(Debug, Default)]
    pub struct PartialFailure {
        pub before: String,
        pub value: Box<String>,
        pub after: String,
    }

    impl Bind for PartialFailure {
        fn bindings(&mut self) -> Vec<Binding<'_>> {
            crate::bindings!(self {
                before: key = "before";
                value: flag = "value", key = "value";
                after: key = "after";
            })
        }
    }
}
