//! Integration tests

use envbind::{
    BindError, Binder, Complex128, Complex64, Kind, Params, Parsers, Record, TypeInfo, Value,
};
use serde::Deserialize;
use serial_test::serial;
use std::collections::{BTreeMap, HashMap};
use std::env;
use std::net::SocketAddr;
use std::num::NonZeroU16;
use std::path::PathBuf;
use std::time::Duration;

fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn bind_from<R: Record>(record: &mut R, pairs: &[(&str, &str)]) -> Result<(), BindError> {
    Binder::with_env(env_of(pairs)).bind(record)
}

#[derive(Debug, Default, PartialEq, Record)]
struct Scalars {
    #[env(name = "I8")]
    pub i8: i8,
    #[env(name = "I16")]
    pub i16: i16,
    #[env(name = "I32")]
    pub i32: i32,
    #[env(name = "I64")]
    pub i64: i64,
    #[env(name = "ISIZE")]
    pub isize: isize,
    #[env(name = "U8")]
    pub u8: u8,
    #[env(name = "U16")]
    pub u16: u16,
    #[env(name = "U32")]
    pub u32: u32,
    #[env(name = "U64")]
    pub u64: u64,
    #[env(name = "USIZE")]
    pub usize: usize,
    #[env(name = "F32")]
    pub f32: f32,
    #[env(name = "F64")]
    pub f64: f64,
    #[env(name = "C64")]
    pub c64: Complex64,
    #[env(name = "C128")]
    pub c128: Complex128,
    #[env(name = "BOOL")]
    pub flag: bool,
    #[env(name = "STRING")]
    pub string: String,
}

#[test]
fn test_scalars_round_trip_through_text() {
    let mut scalars = Scalars::default();
    bind_from(
        &mut scalars,
        &[
            ("I8", "-128"),
            ("I16", "32767"),
            ("I32", "-2147483648"),
            ("I64", "9223372036854775807"),
            ("ISIZE", "-1"),
            ("U8", "255"),
            ("U16", "65535"),
            ("U32", "4294967295"),
            ("U64", "18446744073709551615"),
            ("USIZE", "1"),
            ("F32", "1.5"),
            ("F64", "-2.25e-3"),
            ("C64", "2-3i"),
            ("C128", "(1.5+0.5i)"),
            ("BOOL", "T"),
            ("STRING", "hello world"),
        ],
    )
    .unwrap();

    assert_eq!(
        scalars,
        Scalars {
            i8: i8::MIN,
            i16: i16::MAX,
            i32: i32::MIN,
            i64: i64::MAX,
            isize: -1,
            u8: u8::MAX,
            u16: u16::MAX,
            u32: u32::MAX,
            u64: u64::MAX,
            usize: 1,
            f32: 1.5,
            f64: -2.25e-3,
            c64: Complex64::new(2.0, -3.0),
            c128: Complex128::new(1.5, 0.5),
            flag: true,
            string: "hello world".to_string(),
        }
    );
}

#[test]
fn test_unset_variables_keep_existing_values() {
    let mut scalars = Scalars {
        i64: 42,
        string: "default".to_string(),
        flag: true,
        ..Default::default()
    };
    bind_from(&mut scalars, &[("U8", "7")]).unwrap();

    assert_eq!(scalars.i64, 42);
    assert_eq!(scalars.string, "default");
    assert!(scalars.flag);
    assert_eq!(scalars.u8, 7);
}

#[test]
fn test_overflow_is_a_coercion_failure() {
    let mut scalars = Scalars::default();
    let err = bind_from(&mut scalars, &[("I8", "99999")]).unwrap_err();

    match err {
        BindError::Coercion {
            field,
            var,
            value,
            type_name,
            ..
        } => {
            assert_eq!(field, "i8");
            assert_eq!(var, "I8");
            assert_eq!(value, "99999");
            assert_eq!(type_name, "i8");
        }
        other => panic!("Expected Coercion error, got {other:?}"),
    }
}

#[test]
fn test_invalid_bool_is_a_coercion_failure() {
    let mut scalars = Scalars::default();
    let err = bind_from(&mut scalars, &[("BOOL", "yes")]).unwrap_err();
    assert!(matches!(err, BindError::Coercion { .. }));
    assert!(err.to_string().contains("BOOL"));
}

#[test]
fn test_failure_keeps_earlier_fields() {
    let mut scalars = Scalars::default();
    let result = bind_from(
        &mut scalars,
        &[("I8", "1"), ("U8", "-1"), ("STRING", "never reached")],
    );

    assert!(result.is_err());
    assert_eq!(scalars.i8, 1);
    assert_eq!(scalars.string, "");
}

#[derive(Debug, Default, PartialEq, Record)]
struct Structured {
    #[env(name = "INCLUDE")]
    pub include: Vec<String>,
    #[env(name = "KEY_MAP")]
    pub key_map: HashMap<String, i64>,
    #[env(name = "ORDERED")]
    pub ordered: BTreeMap<String, Vec<u8>>,
}

#[test]
fn test_sequence_from_json() {
    let mut structured = Structured::default();
    bind_from(&mut structured, &[("INCLUDE", r#"["/a","/b"]"#)]).unwrap();
    assert_eq!(structured.include, ["/a", "/b"]);
}

#[test]
fn test_mapping_from_json() {
    let mut structured = Structured::default();
    bind_from(
        &mut structured,
        &[("KEY_MAP", r#"{"x":1}"#), ("ORDERED", r#"{"b":[2],"a":[1,1]}"#)],
    )
    .unwrap();

    assert_eq!(structured.key_map, HashMap::from([("x".to_string(), 1)]));
    assert_eq!(
        structured.ordered.keys().collect::<Vec<_>>(),
        vec!["a", "b"]
    );
}

#[test]
fn test_malformed_json_is_a_coercion_failure() {
    let mut structured = Structured::default();
    let err = bind_from(&mut structured, &[("INCLUDE", "/a,/b")]).unwrap_err();
    assert!(matches!(err, BindError::Coercion { ref field, .. } if field == "include"));
}

#[derive(Debug, Default, PartialEq, Deserialize, Record)]
#[env(json)]
struct Database {
    #[env(name = "DB_HOST")]
    #[serde(rename = "Host")]
    pub host: String,
    #[env(name = "DB_PORT")]
    #[serde(rename = "Port")]
    pub port: i64,
}

#[derive(Debug, Default, PartialEq, Record)]
struct Service {
    #[env(name = "DB_CONFIG")]
    pub database: Database,
}

#[test]
fn test_annotated_record_is_decoded_wholesale() {
    let mut service = Service::default();
    bind_from(
        &mut service,
        &[
            ("DB_CONFIG", r#"{"Host":"x","Port":1}"#),
            ("DB_HOST", "ignored"),
            ("DB_PORT", "5034"),
        ],
    )
    .unwrap();

    assert_eq!(
        service.database,
        Database {
            host: "x".to_string(),
            port: 1
        }
    );
}

#[test]
fn test_annotated_record_recurses_when_unset() {
    let mut service = Service::default();
    bind_from(&mut service, &[("DB_HOST", "db.internal"), ("DB_PORT", "5034")]).unwrap();

    assert_eq!(service.database.host, "db.internal");
    assert_eq!(service.database.port, 5034);
}

#[test]
fn test_nested_error_reports_field_path() {
    let mut service = Service::default();
    let err = bind_from(&mut service, &[("DB_PORT", "not-a-port")]).unwrap_err();
    assert!(matches!(err, BindError::Coercion { ref field, .. } if field == "database.port"));
}

#[derive(Debug, Default, PartialEq, Record)]
struct Tls {
    #[env(name = "TLS_CERT")]
    pub cert: String,
    #[env(name = "TLS_KEY")]
    pub key: String,
}

#[derive(Debug, Default, PartialEq, Record)]
struct Listener {
    pub tls: Tls,
}

#[derive(Debug, Default, PartialEq, Record)]
struct Server {
    #[env(name = "PORT")]
    pub port: Option<u16>,
    pub tls: Option<Tls>,
    pub listener: Option<Listener>,
    #[env(name = "DB_CONFIG")]
    pub database: Option<Database>,
}

#[test]
fn test_optional_record_stays_absent_without_values() {
    let mut server = Server::default();
    bind_from(&mut server, &[("UNRELATED", "1")]).unwrap();
    assert_eq!(server, Server::default());
}

#[test]
fn test_optional_record_allocated_for_satisfied_field() {
    let mut server = Server::default();
    bind_from(&mut server, &[("TLS_CERT", "/cert.pem")]).unwrap();

    assert_eq!(
        server.tls,
        Some(Tls {
            cert: "/cert.pem".to_string(),
            key: String::new(),
        })
    );
}

#[test]
fn test_optional_lookahead_is_one_level_deep() {
    let mut server = Server::default();
    bind_from(&mut server, &[("TLS_KEY", "/key.pem")]).unwrap();

    assert!(server.tls.is_some());
    assert_eq!(server.listener, None);
}

#[test]
fn test_present_optional_record_is_walked() {
    let mut server = Server {
        listener: Some(Listener::default()),
        ..Default::default()
    };
    bind_from(&mut server, &[("TLS_KEY", "/key.pem")]).unwrap();

    let listener = server.listener.unwrap();
    assert_eq!(listener.tls.key, "/key.pem");
}

#[test]
fn test_optional_record_bound_from_its_own_annotation() {
    let mut server = Server::default();
    bind_from(&mut server, &[("DB_CONFIG", r#"{"Host":"h","Port":2}"#)]).unwrap();

    assert_eq!(
        server.database,
        Some(Database {
            host: "h".to_string(),
            port: 2
        })
    );
}

#[test]
fn test_optional_leaf() {
    let mut server = Server::default();
    bind_from(&mut server, &[("PORT", "8080")]).unwrap();
    assert_eq!(server.port, Some(8080));

    let mut server = Server {
        port: Some(1),
        ..Default::default()
    };
    bind_from(&mut server, &[]).unwrap();
    assert_eq!(server.port, Some(1));
}

#[derive(Debug, Default, PartialEq, Record)]
struct Visibility {
    #[env(name = "PUBLIC")]
    pub public: String,
    #[env(name = "PRIVATE")]
    private: String,
    #[env(name = "SKIPPED", skip)]
    pub skipped: String,
}

#[test]
fn test_only_public_fields_are_bound() {
    let mut record = Visibility::default();
    bind_from(
        &mut record,
        &[("PUBLIC", "a"), ("PRIVATE", "b"), ("SKIPPED", "c")],
    )
    .unwrap();

    assert_eq!(record.public, "a");
    assert_eq!(record.private, "");
    assert_eq!(record.skipped, "");
    assert_eq!(Visibility::fields().len(), 1);
}

#[derive(Debug, Default, PartialEq, Record)]
#[env(prefix = "APP_")]
struct Prefixed {
    #[env(name = "PORT")]
    pub port: u16,
    pub tls: Option<Tls>,
}

#[test]
fn test_prefix_applies_to_own_fields_only() {
    let mut record = Prefixed::default();
    bind_from(&mut record, &[("APP_PORT", "80"), ("PORT", "1"), ("TLS_CERT", "c")]).unwrap();

    assert_eq!(record.port, 80);
    assert_eq!(record.tls.map(|tls| tls.cert), Some("c".to_string()));
}

#[derive(Debug, Default, PartialEq)]
struct Seconds(u64);

impl Value for Seconds {
    const KIND: Kind = Kind::Other;
}

#[derive(Debug, Default, PartialEq, Record)]
struct WithParsers {
    #[env(name = "HOSTS", parser = "split", params = "sep=;")]
    pub hosts: Vec<String>,
    #[env(name = "TIMEOUT")]
    pub timeout: Seconds,
    #[env(name = "RETRIES")]
    pub retries: u8,
    #[env(name = "LIMIT")]
    pub limit: i32,
}

fn split(_ty: &TypeInfo, raw: &str, params: &Params) -> Result<Box<dyn std::any::Any>, envbind::BoxError> {
    let sep = params.get("sep").unwrap_or(",");
    let items: Vec<String> = raw.split(sep).map(str::to_string).collect();
    Ok(Box::new(items))
}

#[test]
fn test_keyword_override_wins_over_builtin() {
    let parsers = Parsers::new().keyword("split", split);
    let mut record = WithParsers::default();
    Binder::with_env(env_of(&[("HOSTS", "a;b")]))
        .parsers(parsers)
        .bind(&mut record)
        .unwrap();

    assert_eq!(record.hosts, ["a", "b"]);
}

#[test]
fn test_keyword_without_registration_uses_builtin() {
    let mut record = WithParsers::default();
    bind_from(&mut record, &[("HOSTS", r#"["a"]"#)]).unwrap();
    assert_eq!(record.hosts, ["a"]);
}

#[test]
fn test_unsupported_kind_is_skipped() {
    let mut record = WithParsers {
        timeout: Seconds(30),
        ..Default::default()
    };
    bind_from(&mut record, &[("TIMEOUT", "5"), ("RETRIES", "3")]).unwrap();

    assert_eq!(record.timeout, Seconds(30));
    assert_eq!(record.retries, 3);
}

#[test]
fn test_type_override_binds_caller_type() {
    let parsers = Parsers::new().for_type::<Seconds, _>(|raw, _params| Ok(Seconds(raw.parse()?)));
    let mut record = WithParsers::default();
    Binder::with_env(env_of(&[("TIMEOUT", "5")]))
        .parsers(parsers)
        .bind(&mut record)
        .unwrap();

    assert_eq!(record.timeout, Seconds(5));
}

#[test]
fn test_kind_override_applies_to_the_whole_category() {
    let parsers = Parsers::new().for_kind(Kind::Uint, |ty, raw, _params| {
        assert_eq!(ty.bits(), 8);
        let value: u8 = raw.trim().parse()?;
        Ok(Box::new(value * 2))
    });
    let mut record = WithParsers::default();
    Binder::with_env(env_of(&[("RETRIES", " 3 "), ("LIMIT", "-4")]))
        .parsers(parsers)
        .bind(&mut record)
        .unwrap();

    assert_eq!(record.retries, 6);
    assert_eq!(record.limit, -4);
}

#[test]
fn test_type_override_takes_precedence_over_kind() {
    let parsers = Parsers::new()
        .for_kind(Kind::Int, |_ty, _raw, _params| Ok(Box::new(1i32)))
        .for_type::<i32, _>(|_raw, _params| Ok(2));
    let mut record = WithParsers::default();
    Binder::with_env(env_of(&[("LIMIT", "0")]))
        .parsers(parsers)
        .bind(&mut record)
        .unwrap();

    assert_eq!(record.limit, 2);
}

#[test]
fn test_override_returning_wrong_type_is_rejected() {
    let parsers = Parsers::new().for_kind(Kind::Int, |_ty, _raw, _params| Ok(Box::new(1i64)));
    let mut record = WithParsers::default();
    let err = Binder::with_env(env_of(&[("LIMIT", "0")]))
        .parsers(parsers)
        .bind(&mut record)
        .unwrap_err();

    assert!(matches!(err, BindError::TypeMismatch { ref field, .. } if field == "limit"));
}

#[test]
fn test_override_error_is_a_coercion_failure() {
    let parsers = Parsers::new().keyword("split", |_ty: &TypeInfo, _raw: &str, _params: &Params| {
        Err("refused".into())
    });
    let mut record = WithParsers::default();
    let err = Binder::with_env(env_of(&[("HOSTS", "a")]))
        .parsers(parsers)
        .bind(&mut record)
        .unwrap_err();

    assert!(err.to_string().contains("refused"));
}

#[test]
fn test_binder_is_reusable() {
    let binder = Binder::with_env(env_of(&[("PORT", "8080")]));

    let mut first = Server::default();
    let mut second = Server::default();
    binder.bind(&mut first).unwrap();
    binder.bind(&mut second).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.port, Some(8080));
}

#[derive(Debug, Default, PartialEq, Record)]
struct Runtime {
    #[env(name = "PORT")]
    pub port: u16,
    #[env(name = "DATA_DIR")]
    pub data_dir: PathBuf,
    #[env(name = "TIMEOUT")]
    pub timeout: Duration,
    #[env(name = "LISTEN")]
    pub listen: Option<SocketAddr>,
    #[env(name = "WORKERS")]
    pub workers: Option<NonZeroU16>,
    #[env(name = "LIMITS")]
    pub limits: Box<Vec<u32>>,
    pub cache_dir: PathBuf,
}

fn runtime_env() -> HashMap<String, String> {
    env_of(&[
        ("PORT", "8080"),
        ("DATA_DIR", "/var/lib/app"),
        ("TIMEOUT", "1500"),
        ("LISTEN", "127.0.0.1:9000"),
        ("WORKERS", "4"),
        ("LIMITS", "[1,2]"),
    ])
}

#[test]
fn test_std_leaf_fields_without_parser_are_skipped() {
    let mut runtime = Runtime {
        timeout: Duration::from_secs(30),
        ..Default::default()
    };
    Binder::with_env(runtime_env()).bind(&mut runtime).unwrap();

    assert_eq!(runtime.port, 8080);
    assert_eq!(runtime.data_dir, PathBuf::from("/var/lib/app"));
    assert_eq!(runtime.timeout, Duration::from_secs(30));
    assert_eq!(runtime.listen, None);
    assert_eq!(runtime.workers, None);
    assert_eq!(*runtime.limits, [1, 2]);
    assert_eq!(runtime.cache_dir, PathBuf::new());
}

#[test]
fn test_std_leaf_fields_bound_through_type_parsers() {
    let parsers = Parsers::new()
        .for_type::<Duration, _>(|raw, _params| Ok(Duration::from_millis(raw.parse()?)))
        .for_type::<SocketAddr, _>(|raw, _params| Ok(raw.parse()?))
        .for_type::<NonZeroU16, _>(|raw, _params| Ok(raw.parse()?))
        .for_type::<PathBuf, _>(|raw, _params| Ok(PathBuf::from(raw).join("data")));
    let mut runtime = Runtime::default();
    Binder::with_env(runtime_env())
        .parsers(parsers)
        .bind(&mut runtime)
        .unwrap();

    assert_eq!(runtime.timeout, Duration::from_millis(1500));
    assert_eq!(runtime.listen, Some("127.0.0.1:9000".parse().unwrap()));
    assert_eq!(runtime.workers, NonZeroU16::new(4));
    assert_eq!(runtime.data_dir, PathBuf::from("/var/lib/app/data"));
}

#[test]
fn test_std_leaf_parser_error_is_a_coercion_failure() {
    let parsers =
        Parsers::new().for_type::<SocketAddr, _>(|raw, _params| Ok(raw.parse::<SocketAddr>()?));
    let mut runtime = Runtime::default();
    let err = Binder::with_env(env_of(&[("LISTEN", "not-an-address")]))
        .parsers(parsers)
        .bind(&mut runtime)
        .unwrap_err();

    assert!(matches!(err, BindError::Coercion { ref field, .. } if field == "listen"));
    assert_eq!(runtime.listen, None);
}

#[derive(Debug, Default, PartialEq, Deserialize, Record)]
struct Cache {
    #[env(name = "CACHE_HOST")]
    pub host: String,
}

#[derive(Debug, Default, PartialEq, Record)]
struct WithCache {
    #[env(name = "CACHE_CONFIG")]
    pub cache: Cache,
}

#[test]
fn test_set_record_without_json_marker_is_left_unbound() {
    let mut record = WithCache::default();
    bind_from(
        &mut record,
        &[("CACHE_CONFIG", r#"{"host":"x"}"#), ("CACHE_HOST", "y")],
    )
    .unwrap();

    assert_eq!(record.cache, Cache::default());
}

#[test]
fn test_unset_record_without_json_marker_is_walked() {
    let mut record = WithCache::default();
    bind_from(&mut record, &[("CACHE_HOST", "y")]).unwrap();
    assert_eq!(record.cache.host, "y");
}

#[derive(Debug, Default, PartialEq, Record)]
struct ProcessConfig {
    #[env(name = "ENVBIND_IT_DB_PORT")]
    pub port: i64,
    #[env(name = "ENVBIND_IT_HOSTS", parser = "split")]
    pub hosts: Vec<String>,
}

#[test]
#[serial]
fn test_bind_reads_process_environment() {
    env::set_var("ENVBIND_IT_DB_PORT", "5034");
    env::remove_var("ENVBIND_IT_HOSTS");

    let mut config = ProcessConfig::default();
    envbind::bind(&mut config).unwrap();
    assert_eq!(config.port, 5034);

    env::remove_var("ENVBIND_IT_DB_PORT");
}

#[test]
#[serial]
fn test_bind_with_parsers_reads_process_environment() {
    env::set_var("ENVBIND_IT_HOSTS", "x,y");

    let parsers = Parsers::new().keyword("split", split);
    let mut config = ProcessConfig::default();
    envbind::bind_with_parsers(&mut config, &parsers).unwrap();
    assert_eq!(config.hosts, ["x", "y"]);

    env::remove_var("ENVBIND_IT_HOSTS");
}

#[test]
#[serial]
fn test_from_env_constructor() {
    env::set_var("ENVBIND_IT_DB_PORT", "not a number");
    assert!(ProcessConfig::from_env().is_err());

    env::set_var("ENVBIND_IT_DB_PORT", "1");
    let config = ProcessConfig::from_env().unwrap();
    assert_eq!(config.port, 1);

    env::remove_var("ENVBIND_IT_DB_PORT");
}
