/// Unwraps the `Err` of a `Result`, panicking with the `Ok` value otherwise.
///
/// `assert_err!(expr => is_kind)` also checks the error with the named
/// predicate method.
#[macro_export]
macro_rules! assert_err {
    ($e:expr => $pred:ident) => {{
        let err = $crate::assert_err!($e);
        assert!(err.$pred(), "expected `{}`; actual={:?}", stringify!($pred), err);
        err
    }};
    ($e:expr $(, $($t:tt)* )?) => {
        match $e {
            Err(err) => err,
            Ok(value) => {
                let msg = format!("expected `Err`; actual=Ok({:?})", value);
                $( let msg = format!("{msg}, {}", format_args!($($t)*)); )?
                panic!("{}", msg);
            }
        }
    };
}

/// Unwraps the `Ok` of a `Result`, panicking with the error otherwise.
#[macro_export]
macro_rules! assert_ok {
    ($e:expr) => {
        match $e {
            Ok(value) => value,
            Err(err) => panic!("expected `Ok`; actual=Err({:?})", err),
        }
    };
}
