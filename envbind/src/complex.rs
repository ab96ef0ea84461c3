//! Complex numbers and their textual form

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;
use crate::value::{parse_float, Float};

/// A complex number with real and imaginary parts of type `T`.
///
/// Parsed from `N`, `Ni` or `N±Ni`, optionally wrapped in parentheses:
///
/// ```rust
/// use envbind::Complex128;
///
/// let z: Complex128 = "(2-3i)".parse().unwrap();
/// assert_eq!(z, Complex128::new(2.0, -3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

/// Complex number with `f32` components (64 bits in total).
pub type Complex64 = Complex<f32>;

/// Complex number with `f64` components (128 bits in total).
pub type Complex128 = Complex<f64>;

impl<T> Complex<T> {
    pub const fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

impl<T: fmt::Display + PartialOrd + Default> fmt::Display for Complex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im < T::default() {
            write!(f, "({}{}i)", self.re, self.im)
        } else {
            write!(f, "({}+{}i)", self.re, self.im)
        }
    }
}

impl FromStr for Complex<f32> {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_complex(s, "complex64")
    }
}

impl FromStr for Complex<f64> {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_complex(s, "complex128")
    }
}

fn parse_complex<T: Float>(input: &str, expected: &'static str) -> Result<Complex<T>, ValueError> {
    let syntax = || ValueError::syntax(input, expected);
    let component = |text: &str| {
        parse_float::<T>(text).map_err(|err| match err {
            ValueError::OutOfRange { .. } => ValueError::out_of_range(input, expected),
            ValueError::Syntax { .. } => syntax(),
        })
    };

    let mut s = input;
    if s.len() >= 2 && s.starts_with('(') && s.ends_with(')') {
        s = &s[1..s.len() - 1];
    }

    let n = float_prefix(s);
    if n == 0 {
        return Err(syntax());
    }
    let first = component(&s[..n])?;
    let mut rest = &s[n..];
    if rest.is_empty() {
        return Ok(Complex::new(first, T::default()));
    }

    match rest.as_bytes()[0] {
        // keep the sign when doubled so "++" stays a syntax error
        b'+' => {
            if rest.len() > 1 && rest.as_bytes()[1] != b'+' {
                rest = &rest[1..];
            }
        }
        b'-' => {}
        b'i' if rest.len() == 1 => return Ok(Complex::new(T::default(), first)),
        _ => return Err(syntax()),
    }

    let n = float_prefix(rest);
    if n == 0 {
        return Err(syntax());
    }
    let im = component(&rest[..n])?;
    if &rest[n..] != "i" {
        return Err(syntax());
    }
    Ok(Complex::new(first, im))
}

/// Length of the longest prefix of `s` that reads as a decimal float.
///
/// Returns `0` when no float starts at the beginning of `s`.
fn float_prefix(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i = 1;
    }

    for word in ["infinity", "inf", "nan"] {
        let matched = bytes
            .get(i..i + word.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(word.as_bytes()));
        if matched {
            return i + word.len();
        }
    }

    let is_digit = |at: usize| bytes.get(at).is_some_and(u8::is_ascii_digit);
    let mut mantissa_digits = 0;
    while is_digit(i) {
        i += 1;
        mantissa_digits += 1;
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        while is_digit(i) {
            i += 1;
            mantissa_digits += 1;
        }
    }
    if mantissa_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exponent_start = j;
        while is_digit(j) {
            j += 1;
        }
        if j > exponent_start {
            i = j;
        }
    }
    i
}
