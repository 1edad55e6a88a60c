//! Lenient number coercion for form answers.
//!
//! Both helpers read the longest numeric prefix after leading whitespace and ignore whatever
//! follows, so `"3.5 / 4"` reads as `3.5` and `"2,500,000"` reads as `2`. JSON numbers are
//! taken as they are; integer reads drop the fraction.

use serde_json::Value;

pub(crate) fn float_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => leading_float(text),
        _ => None,
    }
}

pub(crate) fn int_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float.trunc() as i64)),
        Value::String(text) => leading_int(text),
        _ => None,
    }
}

pub(crate) fn leading_float(raw: &str) -> Option<f64> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    if text[end..].starts_with("Infinity") {
        let negative = bytes.first() == Some(&b'-');
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = end;
    end = skip_digits(bytes, end);
    let mut mantissa_digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = skip_digits(bytes, end + 1);
        let frac_digits = frac_end - (end + 1);
        if frac_digits > 0 {
            mantissa_digits += frac_digits;
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+') | Some(b'-')) {
            exp += 1;
        }
        let exp_end = skip_digits(bytes, exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    text[..end].parse::<f64>().ok()
}

pub(crate) fn leading_int(raw: &str) -> Option<i64> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let negative = bytes.first() == Some(&b'-');
    let start = usize::from(matches!(bytes.first(), Some(b'+') | Some(b'-')));
    let end = skip_digits(bytes, start);
    if end == start {
        return None;
    }

    let digits = &text[start..end];
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

fn skip_digits(bytes: &[u8], mut index: usize) -> usize {
    while bytes.get(index).is_some_and(u8::is_ascii_digit) {
        index += 1;
    }
    index
}
