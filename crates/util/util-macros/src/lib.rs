#[macro_export]
macro_rules! return_if {
    ($expr:expr) => {
        if $expr {
            return Ok(Default::default());
        }
    };
}

#[macro_export]
macro_rules! unwrap_or_return {
    ($option:expr) => {
        match $option {
            Some(val) => val,
            None => return Default::default(),
        }
    };
    ($option:expr, $ret:expr) => {
        match $option {
            Some(val) => val,
            None => return $ret,
        }
    };
}

/// Evaluates to the `Ok` value of a nested `Result<Result<T, E>, _>` stage,
/// returning `Ok(Err(e))` from the enclosing function on the inner error.
#[macro_export]
macro_rules! early_return_on_err {
    ($e:expr) => {
        match $e {
            Ok(x) => x,
            Err(err) => {
                return Ok(Err(err));
            }
        }
    };
}

#[cfg(test)]
mod tests {
    fn first_even(values: &[u32]) -> u32 {
        let value = unwrap_or_return!(values.iter().find(|v| *v % 2 == 0));
        *value
    }

    fn stage(
        input: Result<u32, &'static str>,
    ) -> Result<Result<u32, &'static str>, ()> {
        let value = early_return_on_err!(input);
        Ok(Ok(value + 1))
    }

    fn skip_zero(value: u32) -> Result<u32, ()> {
        return_if!(value == 0);
        Ok(value * 2)
    }

    #[test]
    fn test_macros() {
        assert_eq!(first_even(&[1, 3, 4]), 4);
        assert_eq!(first_even(&[1, 3]), 0);
        assert_eq!(stage(Ok(1)), Ok(Ok(2)));
        assert_eq!(stage(Err("bad")), Ok(Err("bad")));
        assert_eq!(skip_zero(0), Ok(0));
        assert_eq!(skip_zero(3), Ok(6));
    }
}
