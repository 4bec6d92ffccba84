//! ISO 8601 text codec shared by [`DateTime`] and [`DateTimeOffset`].
//!
//! The grammar is described once, as tables of numeric fields ([`EXTENDED`]
//! and [`BASIC`]). Parsing first tries a fast path that only accepts the
//! extended layout with every field at full width, checked byte by byte
//! against a template generated from the table. Anything else goes to the
//! flexible path, which walks the same tables but tolerates short fields and
//! the basic layout. Both paths share the fraction reader, the zone
//! designator reader and [`Fields::to_ticks`], so a string accepted by both
//! always produces the same value.
//!
//! [`DateTime`]: crate::DateTime
//! [`DateTimeOffset`]: crate::DateTimeOffset

use std::fmt::{self, Write};

use crate::{
    DateTime, ParseError, TimeSpan,
    calendar::{date_from_ticks, is_valid_date, is_valid_time, ticks_from_date, ticks_from_time, time_from_ticks},
    consts::{
        DATE_SEPARATOR, DATE_TIME_SEPARATOR, FRACTION_DIGITS, FRACTION_SEPARATOR, MAX_OFFSET_HOURS,
        TICKS_PER_MICROSECOND, TICKS_PER_MILLISECOND, TICKS_PER_SECOND, TIME_SEPARATOR,
        UTC_DESIGNATOR,
    },
};

/// Output variants understood by `format` on both instant types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Format {
    /// `2023-01-15T10:30:00Z`, or `…+05:30` with an offset
    #[default]
    Iso8601,
    /// Seven fractional digits, one per tick: `2023-01-15T10:30:00.1234567Z`
    Precise,
    /// Fraction without trailing zeros, at least one digit: `…:00.5Z`, `…:00.0Z`
    PreciseTrimmed,
    /// Three fractional digits: `…:00.123Z`
    Millis,
    /// Six fractional digits: `…:00.123456Z`
    Micros,
    /// Always an explicit numeric offset: `2023-01-15T10:30:00+00:00`
    Extended,
    /// No separators: `20230115T103000Z`, or `…T103000+0530` with an offset
    Basic,
    /// `2023-01-15`
    Date,
    /// `10:30:00`, followed by the offset when there is one
    Time,
    /// Whole seconds since 1970-01-01T00:00:00Z
    UnixSeconds,
    /// Whole milliseconds since 1970-01-01T00:00:00Z
    UnixMilliseconds,
}

// --- grammar ---

/// A numeric field: the separator preceding it and how many digits it may have.
#[derive(Debug, Clone, Copy)]
struct Field {
    separator: Option<u8>,
    min_digits: usize,
    max_digits: usize,
}

impl Field {
    const fn new(separator: Option<u8>, min_digits: usize, max_digits: usize) -> Self {
        Self {
            separator,
            min_digits,
            max_digits,
        }
    }
}

/// Year, month, day, then hour, minute, second.
type Layout = [Field; 6];

const DATE_FIELDS: usize = 3;

const DATE_SEP: u8 = DATE_SEPARATOR as u8;
const TIME_SEP: u8 = TIME_SEPARATOR as u8;
const T: u8 = DATE_TIME_SEPARATOR as u8;
const DOT: u8 = FRACTION_SEPARATOR as u8;
const Z: u8 = UTC_DESIGNATOR as u8;

/// `YYYY-MM-DDTHH:mm:ss`, month through second may drop their leading zero.
const EXTENDED: Layout = [
    Field::new(None, 4, 4),
    Field::new(Some(DATE_SEP), 1, 2),
    Field::new(Some(DATE_SEP), 1, 2),
    Field::new(Some(T), 1, 2),
    Field::new(Some(TIME_SEP), 1, 2),
    Field::new(Some(TIME_SEP), 1, 2),
];

/// `YYYYMMDDTHHMMSS`
const BASIC: Layout = [
    Field::new(None, 4, 4),
    Field::new(None, 2, 2),
    Field::new(None, 2, 2),
    Field::new(Some(T), 2, 2),
    Field::new(None, 2, 2),
    Field::new(None, 2, 2),
];

const fn full_width(layout: &Layout, from: usize, to: usize) -> usize {
    let mut width = 0;
    let mut i = from;
    while i < to {
        if layout[i].separator.is_some() {
            width += 1;
        }
        width += layout[i].max_digits;
        i += 1;
    }
    width
}

/// Length of `YYYY-MM-DD`.
const FAST_DATE_LEN: usize = full_width(&EXTENDED, 0, DATE_FIELDS);
/// Length of `YYYY-MM-DDTHH:mm:ss`.
const FAST_DATE_TIME_LEN: usize = full_width(&EXTENDED, 0, EXTENDED.len());

/// Marks a digit position in [`FAST_TEMPLATE`].
const DIGIT: u8 = b'#';

/// `####-##-##T##:##:##`, generated from [`EXTENDED`] at full width.
const FAST_TEMPLATE: [u8; FAST_DATE_TIME_LEN] = {
    let mut out = [DIGIT; FAST_DATE_TIME_LEN];
    let mut pos = 0;
    let mut i = 0;
    while i < EXTENDED.len() {
        if let Some(sep) = EXTENDED[i].separator {
            out[pos] = sep;
            pos += 1;
        }
        pos += EXTENDED[i].max_digits;
        i += 1;
    }
    out
};

/// Which offset spellings a path accepts after the time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OffsetForms {
    /// `±HH:MM` only
    Extended,
    /// `±HH:MM`, `±H:MM`, `±HHMM`, `±HH`, `±H`
    Any,
}

// --- shared assembly ---

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Fields {
    /// Year, month, day, hour, minute, second
    values: [i32; 6],
    /// Sub-second part, in ticks
    fraction: i64,
}

impl Fields {
    fn to_ticks(self) -> Result<i64, ParseError> {
        let [year, month, day, hour, minute, second] = self.values;
        if !is_valid_date(year, month, day) {
            return Err(ParseError::InvalidDate { year, month, day });
        }
        if !is_valid_time(hour, minute, second, 0) {
            return Err(ParseError::InvalidTime {
                hour,
                minute,
                second,
            });
        }
        Ok(ticks_from_date(year, month, day) + ticks_from_time(hour, minute, second, 0) + self.fraction)
    }
}

/// What the parser extracted from a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Parsed {
    /// Wall-clock ticks as written
    pub(crate) ticks: i64,
    /// `None` when the text had no zone designator; `Z` reads as zero
    pub(crate) offset: Option<TimeSpan>,
}

fn number(digits: &[u8]) -> i32 {
    digits
        .iter()
        .fold(0, |acc, &d| acc * 10 + i32::from(d - b'0'))
}

struct Cursor<'i> {
    input: &'i [u8],
    pos: usize,
}

impl<'i> Cursor<'i> {
    const fn new(input: &'i [u8], pos: usize) -> Self {
        Self { input, pos }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn rest(&self) -> &'i [u8] {
        self.input.get(self.pos..).unwrap_or_default()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn digits(&mut self, min: usize, max: usize) -> Option<i32> {
        let start = self.pos;
        while self.pos - start < max && self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.pos - start < min {
            return None;
        }
        Some(number(&self.input[start..self.pos]))
    }

    fn field(&mut self, field: &Field) -> Option<i32> {
        if let Some(sep) = field.separator {
            if !self.eat(sep) {
                return None;
            }
        }
        self.digits(field.min_digits, field.max_digits)
    }

    /// Reads `.f…` with the cursor on the dot. Up to seven digits count, any
    /// further digits are skipped without rounding.
    fn fraction(&mut self) -> Option<i64> {
        if !self.eat(DOT) {
            return None;
        }
        let start = self.pos;
        let mut value = 0_i64;
        while let Some(d) = self.peek().filter(u8::is_ascii_digit) {
            if self.pos - start < FRACTION_DIGITS {
                value = value * 10 + i64::from(d - b'0');
            }
            self.pos += 1;
        }
        let counted = (self.pos - start).min(FRACTION_DIGITS);
        if counted == 0 {
            return None;
        }
        Some(value * 10_i64.pow((FRACTION_DIGITS - counted) as u32))
    }
}

/// Reads what follows the date and time: nothing, `Z`, or a signed offset.
fn designator(rest: &[u8], forms: OffsetForms) -> Result<Option<TimeSpan>, ParseError> {
    let invalid = || ParseError::InvalidOffset(String::from_utf8_lossy(rest).into_owned());
    let (sign, body) = match rest {
        [] => return Ok(None),
        [Z] => return Ok(Some(TimeSpan::ZERO)),
        [b'+', body @ ..] => (1, body),
        [b'-', body @ ..] => (-1, body),
        _ => return Err(invalid()),
    };
    let digit = |b: &u8| b.is_ascii_digit().then(|| i32::from(b - b'0'));
    let pair = |a: &u8, b: &u8| -> Option<i32> { Some(digit(a)? * 10 + digit(b)?) };
    // A second sign, as in `+-05:00`, matches none of these shapes.
    let parsed = match (forms, body) {
        (_, [h1, h2, TIME_SEP, m1, m2]) => pair(h1, h2).zip(pair(m1, m2)),
        (OffsetForms::Any, [h, TIME_SEP, m1, m2]) => digit(h).zip(pair(m1, m2)),
        (OffsetForms::Any, [h1, h2, m1, m2]) => pair(h1, h2).zip(pair(m1, m2)),
        (OffsetForms::Any, [h1, h2]) => pair(h1, h2).map(|h| (h, 0)),
        (OffsetForms::Any, [h]) => digit(h).map(|h| (h, 0)),
        _ => None,
    };
    let (hours, minutes) = parsed.ok_or_else(invalid)?;
    if hours > MAX_OFFSET_HOURS || minutes > 59 || (hours == MAX_OFFSET_HOURS && minutes > 0) {
        return Err(invalid());
    }
    Ok(Some(TimeSpan::from_minutes_i32(sign * (hours * 60 + minutes))))
}

// --- parse paths ---

fn matches_template(input: &[u8], from: usize, to: usize) -> bool {
    input.len() >= to
        && input[from..to]
            .iter()
            .zip(&FAST_TEMPLATE[from..to])
            .all(|(&b, &t)| if t == DIGIT { b.is_ascii_digit() } else { b == t })
}

/// Reads full-width fields at fixed positions; the template check has
/// already guaranteed every position holds what the layout expects.
fn read_fixed(input: &[u8], fields: &[Field], mut pos: usize, out: &mut [i32]) {
    for (field, slot) in fields.iter().zip(out) {
        if field.separator.is_some() {
            pos += 1;
        }
        *slot = number(&input[pos..pos + field.max_digits]);
        pos += field.max_digits;
    }
}

/// Fixed-position parse of the common full-width extended form. Returns
/// `None` on any deviation so the caller can fall back.
fn parse_fast(input: &[u8]) -> Option<Parsed> {
    if !matches_template(input, 0, FAST_DATE_LEN) {
        return None;
    }
    let mut fields = Fields::default();
    read_fixed(input, &EXTENDED[..DATE_FIELDS], 0, &mut fields.values[..DATE_FIELDS]);

    let mut cursor = Cursor::new(input, FAST_DATE_LEN);
    if cursor.peek() == Some(T) {
        if !matches_template(input, FAST_DATE_LEN, FAST_DATE_TIME_LEN) {
            return None;
        }
        read_fixed(
            input,
            &EXTENDED[DATE_FIELDS..],
            FAST_DATE_LEN,
            &mut fields.values[DATE_FIELDS..],
        );
        cursor.pos = FAST_DATE_TIME_LEN;
        if cursor.peek() == Some(DOT) {
            fields.fraction = cursor.fraction()?;
        }
    }

    let offset = designator(cursor.rest(), OffsetForms::Extended).ok()?;
    let ticks = fields.to_ticks().ok()?;
    Some(Parsed { ticks, offset })
}

/// Tolerant parse: short fields, the basic layout, optional time and every
/// offset spelling.
fn parse_flexible(input: &str) -> Result<Parsed, ParseError> {
    let bytes = input.as_bytes();
    let invalid = || ParseError::InvalidFormat(input.to_owned());
    let layout = if bytes.get(4).is_some_and(u8::is_ascii_digit) {
        &BASIC
    } else {
        &EXTENDED
    };

    let mut cursor = Cursor::new(bytes, 0);
    let mut fields = Fields::default();
    for (field, slot) in layout[..DATE_FIELDS].iter().zip(&mut fields.values) {
        *slot = cursor.field(field).ok_or_else(invalid)?;
    }
    if cursor.peek() == layout[DATE_FIELDS].separator {
        for (field, slot) in layout[DATE_FIELDS..]
            .iter()
            .zip(&mut fields.values[DATE_FIELDS..])
        {
            *slot = cursor.field(field).ok_or_else(invalid)?;
        }
        if cursor.peek() == Some(DOT) {
            fields.fraction = cursor.fraction().ok_or_else(invalid)?;
        }
    }

    let offset = designator(cursor.rest(), OffsetForms::Any)?;
    let ticks = fields.to_ticks()?;
    Ok(Parsed { ticks, offset })
}

pub(crate) fn parse(input: &str) -> Result<Parsed, ParseError> {
    if input.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    if let Some(parsed) = parse_fast(input.as_bytes()) {
        return Ok(parsed);
    }
    trace!("fast path rejected {input:?}, trying flexible grammar");
    let result = parse_flexible(input);
    #[cfg(feature = "logging")]
    {
        if let Err(err) = &result {
            trace!("failed to parse {input:?}: {err}");
        }
    }
    result
}

// --- formatting ---

fn write_date<W: Write>(w: &mut W, year: i32, month: i32, day: i32) -> fmt::Result {
    write!(w, "{year:04}{DATE_SEPARATOR}{month:02}{DATE_SEPARATOR}{day:02}")
}

fn write_time<W: Write>(w: &mut W, hour: i32, minute: i32, second: i32) -> fmt::Result {
    write!(w, "{hour:02}{TIME_SEPARATOR}{minute:02}{TIME_SEPARATOR}{second:02}")
}

/// `.` followed by the sub-second part at the given number of digits.
fn write_fraction<W: Write>(w: &mut W, ticks: i64, digits: usize) -> fmt::Result {
    let fraction = ticks.rem_euclid(TICKS_PER_SECOND);
    let value = match digits {
        3 => fraction / TICKS_PER_MILLISECOND,
        6 => fraction / TICKS_PER_MICROSECOND,
        _ => fraction,
    };
    write!(w, "{FRACTION_SEPARATOR}{value:0digits$}")
}

fn write_fraction_trimmed<W: Write>(w: &mut W, ticks: i64) -> fmt::Result {
    let fraction = ticks.rem_euclid(TICKS_PER_SECOND);
    if fraction == 0 {
        return write!(w, "{FRACTION_SEPARATOR}0");
    }
    let mut digits = [b'0'; FRACTION_DIGITS];
    let mut rest = fraction;
    for slot in digits.iter_mut().rev() {
        *slot = b'0' + (rest % 10) as u8;
        rest /= 10;
    }
    let len = digits.iter().rposition(|&d| d != b'0').map_or(1, |i| i + 1);
    w.write_char(FRACTION_SEPARATOR)?;
    for &d in &digits[..len] {
        w.write_char(char::from(d))?;
    }
    Ok(())
}

/// `±HH:MM`, or `±HHMM` when `compact`.
fn write_offset<W: Write>(w: &mut W, offset: TimeSpan, compact: bool) -> fmt::Result {
    let minutes = offset.total_minutes();
    let sign = if minutes < 0 { '-' } else { '+' };
    let (hours, minutes) = (minutes.abs() / 60, minutes.abs() % 60);
    if compact {
        write!(w, "{sign}{hours:02}{minutes:02}")
    } else {
        write!(w, "{sign}{hours:02}{TIME_SEPARATOR}{minutes:02}")
    }
}

/// The zone suffix: `Z` for a bare instant, the numeric offset otherwise.
fn write_zone<W: Write>(w: &mut W, offset: Option<TimeSpan>) -> fmt::Result {
    match offset {
        Some(offset) => write_offset(w, offset, false),
        None => w.write_char(UTC_DESIGNATOR),
    }
}

/// Writes `ticks` (wall-clock) in `format`. `offset` is `None` for a bare
/// [`DateTime`], which is rendered as UTC.
pub(crate) fn write<W: Write>(
    w: &mut W,
    ticks: i64,
    offset: Option<TimeSpan>,
    format: Format,
) -> fmt::Result {
    let (year, month, day) = date_from_ticks(ticks);
    let (hour, minute, second, _) = time_from_ticks(ticks);
    let utc = || DateTime::from_ticks(ticks.saturating_sub(offset.unwrap_or_default().ticks()));

    match format {
        Format::Iso8601
        | Format::Precise
        | Format::PreciseTrimmed
        | Format::Millis
        | Format::Micros
        | Format::Extended => {
            write_date(w, year, month, day)?;
            w.write_char(DATE_TIME_SEPARATOR)?;
            write_time(w, hour, minute, second)?;
            match format {
                Format::Precise => write_fraction(w, ticks, FRACTION_DIGITS)?,
                Format::PreciseTrimmed => write_fraction_trimmed(w, ticks)?,
                Format::Millis => write_fraction(w, ticks, 3)?,
                Format::Micros => write_fraction(w, ticks, 6)?,
                _ => {}
            }
            if format == Format::Extended {
                write_offset(w, offset.unwrap_or_default(), false)
            } else {
                write_zone(w, offset)
            }
        }
        Format::Basic => {
            write!(
                w,
                "{year:04}{month:02}{day:02}{DATE_TIME_SEPARATOR}{hour:02}{minute:02}{second:02}"
            )?;
            match offset {
                Some(offset) => write_offset(w, offset, true),
                None => w.write_char(UTC_DESIGNATOR),
            }
        }
        Format::Date => write_date(w, year, month, day),
        Format::Time => {
            write_time(w, hour, minute, second)?;
            match offset {
                Some(offset) => write_offset(w, offset, false),
                None => Ok(()),
            }
        }
        Format::UnixSeconds => write!(w, "{}", utc().to_epoch_seconds()),
        Format::UnixMilliseconds => write!(w, "{}", utc().to_epoch_milliseconds()),
    }
}

pub(crate) fn format(ticks: i64, offset: Option<TimeSpan>, format: Format) -> String {
    let mut out = String::with_capacity(40);
    // Writing into a String cannot fail.
    let _ = write(&mut out, ticks, offset, format);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::arbitrary::ValidTicks;
    use crate::consts::TICKS_PER_DAY;
    use quickcheck::{Arbitrary, Gen, quickcheck};

    fn ticks_of(input: &str) -> Option<i64> {
        parse(input).ok().map(|p| p.ticks)
    }

    #[test]
    fn test_template_generated_from_table() {
        assert_eq!(&FAST_TEMPLATE, b"####-##-##T##:##:##");
        assert_eq!(FAST_DATE_LEN, 10);
    }

    #[test]
    fn test_fast_path_forms() {
        let base = ticks_from_date(2023, 1, 15);
        let time = ticks_from_time(10, 30, 0, 0);
        assert_eq!(parse_fast(b"2023-01-15").map(|p| p.ticks), Some(base));
        assert_eq!(parse_fast(b"2023-01-15T10:30:00").map(|p| p.ticks), Some(base + time));
        let zulu = parse_fast(b"2023-01-15T10:30:00Z").unwrap();
        assert_eq!(zulu.ticks, base + time);
        assert_eq!(zulu.offset, Some(TimeSpan::ZERO));
        assert_eq!(
            parse_fast(b"2023-01-15T10:30:00.1234567Z").map(|p| p.ticks),
            Some(base + time + 1_234_567)
        );
    }

    #[test]
    fn test_fast_path_rejects_deviations() {
        for input in [
            "2023-1-15",
            "2023/01/15",
            "2023-01-15 10:30:00",
            "2023-01-15T10:30",
            "2023-01-15T1:30:00",
            "2023-01-15T10:30:00.",
            "2023-01-15T10:30:00+0530",
            "2023-01-15T10:30:00+05",
            "2023-01-15T10:30:00Zx",
            "20230115T103000Z",
            "202a-01-15",
        ] {
            assert_eq!(parse_fast(input.as_bytes()), None, "{input}");
        }
    }

    #[test]
    fn test_fraction_padding_and_truncation() {
        let base = ticks_from_date(2023, 1, 15);
        assert_eq!(ticks_of("2023-01-15T00:00:00.5"), Some(base + 5_000_000));
        assert_eq!(ticks_of("2023-01-15T00:00:00.1234567"), Some(base + 1_234_567));
        // Digits past the seventh are dropped, never rounded.
        assert_eq!(ticks_of("2023-01-15T00:00:00.123456789Z"), Some(base + 1_234_567));
        assert_eq!(ticks_of("2023-01-15T00:00:00.99999999"), Some(base + 9_999_999));
    }

    #[test]
    fn test_flexible_short_fields() {
        let expected = ticks_from_date(2023, 1, 5) + ticks_from_time(7, 8, 9, 0);
        assert_eq!(ticks_of("2023-1-5T7:8:9"), Some(expected));
        assert_eq!(ticks_of("2023-01-5T07:8:09Z"), Some(expected));
        assert_eq!(ticks_of("2023-1-05"), Some(ticks_from_date(2023, 1, 5)));
    }

    #[test]
    fn test_flexible_basic_layout() {
        let expected = ticks_from_date(2023, 1, 15) + ticks_from_time(10, 30, 0, 0);
        assert_eq!(ticks_of("20230115T103000Z"), Some(expected));
        let parsed = parse("20230601T120000+0530").unwrap();
        assert_eq!(parsed.offset, Some(TimeSpan::from_minutes_i32(330)));
        assert_eq!(ticks_of("20230115"), Some(ticks_from_date(2023, 1, 15)));
    }

    #[test]
    fn test_rejects_malformed() {
        for input in [
            "",
            "2023",
            "23-01-15",
            "2023-01",
            "2023-001-15",
            "2023-01-15T",
            "2023-01-15T10",
            "2023-01-15T10:30",
            "2023-01-15T10:30:00.",
            "2023-01-15T10:30:00abc",
            "2023-01-15T10:30:00 ",
            "2023-01-15T10:30:00ZZ",
            "2023-13-01",
            "2023-02-29",
            "2023-01-15T24:00:00",
            "2023-01-15T23:60:00",
            "2023-01-15T23:59:60",
            "2023-01-15T10:30:00+",
            "2023-01-15T10:30:00+05:3",
            "2023-01-15T10:30:00+053",
            "2023-01-15T10:30:00+05300",
            "2023-01-15T10:30:00+ab:cd",
        ] {
            assert!(parse(input).is_err(), "{input:?} should not parse");
        }
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(parse(""), Err(ParseError::EmptyInput));
        assert_eq!(
            parse("2023-02-30"),
            Err(ParseError::InvalidDate {
                year: 2023,
                month: 2,
                day: 30
            })
        );
        assert!(matches!(
            parse("2023-01-15T25:00:00"),
            Err(ParseError::InvalidTime { hour: 25, .. })
        ));
        assert!(matches!(parse("2023-01-15T10:00:00+15:00"), Err(ParseError::InvalidOffset(_))));
        assert!(matches!(parse("15/01/2023"), Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_offset_bounds() {
        let offset = |s: &str| parse(&format!("2023-06-01T12:00:00{s}")).map(|p| p.offset);
        assert_eq!(offset("+14:00"), Ok(Some(TimeSpan::from_minutes_i32(840))));
        assert_eq!(offset("-14:00"), Ok(Some(TimeSpan::from_minutes_i32(-840))));
        assert!(offset("+14:01").is_err());
        assert!(offset("-14:30").is_err());
        assert!(offset("+15:00").is_err());
        assert!(offset("+05:60").is_err());
        assert!(offset("+14:00:01").is_err());
        assert!(offset("+1400").is_ok());
        assert!(offset("+1401").is_err());
    }

    #[test]
    fn test_offset_spellings() {
        let offset = |s: &str| {
            parse(&format!("2023-06-01T12:00:00{s}"))
                .ok()
                .and_then(|p| p.offset)
                .map(TimeSpan::total_minutes)
        };
        assert_eq!(offset("+05:30"), Some(330));
        assert_eq!(offset("+5:30"), Some(330));
        assert_eq!(offset("+0530"), Some(330));
        assert_eq!(offset("+05"), Some(300));
        assert_eq!(offset("-5"), Some(-300));
        assert_eq!(offset("-03:00"), Some(-180));
        assert_eq!(offset("Z"), Some(0));
        assert_eq!(offset(""), None);
    }

    #[test]
    fn test_rejects_doubled_sign() {
        for sign in ["+-", "-+", "++", "--"] {
            let input = format!("2023-06-01T12:00:00{sign}05:00");
            assert!(parse(&input).is_err(), "{input}");
        }
    }

    #[test]
    fn test_offset_after_date_only() {
        let parsed = parse("2023-06-01+05:00").unwrap();
        assert_eq!(parsed.ticks, ticks_from_date(2023, 6, 1));
        assert_eq!(parsed.offset, Some(TimeSpan::from_minutes_i32(300)));
        assert_eq!(parse("2023-06-01Z").unwrap().offset, Some(TimeSpan::ZERO));
    }

    #[test]
    fn test_format_variants() {
        let ticks = ticks_from_date(2023, 1, 15) + ticks_from_time(10, 30, 5, 0) + 1_234_567;
        let f = |format| super::format(ticks, None, format);
        assert_eq!(f(Format::Iso8601), "2023-01-15T10:30:05Z");
        assert_eq!(f(Format::Precise), "2023-01-15T10:30:05.1234567Z");
        assert_eq!(f(Format::PreciseTrimmed), "2023-01-15T10:30:05.1234567Z");
        assert_eq!(f(Format::Millis), "2023-01-15T10:30:05.123Z");
        assert_eq!(f(Format::Micros), "2023-01-15T10:30:05.123456Z");
        assert_eq!(f(Format::Extended), "2023-01-15T10:30:05+00:00");
        assert_eq!(f(Format::Basic), "20230115T103005Z");
        assert_eq!(f(Format::Date), "2023-01-15");
        assert_eq!(f(Format::Time), "10:30:05");
        assert_eq!(f(Format::UnixSeconds), "1673778605");
        assert_eq!(f(Format::UnixMilliseconds), "1673778605123");
    }

    #[test]
    fn test_format_variants_with_offset() {
        let ticks = ticks_from_date(2023, 6, 1) + ticks_from_time(12, 0, 0, 0) + 5_000_000;
        let offset = Some(TimeSpan::from_minutes_i32(-330));
        let f = |format| super::format(ticks, offset, format);
        assert_eq!(f(Format::Iso8601), "2023-06-01T12:00:00-05:30");
        assert_eq!(f(Format::Precise), "2023-06-01T12:00:00.5000000-05:30");
        assert_eq!(f(Format::PreciseTrimmed), "2023-06-01T12:00:00.5-05:30");
        assert_eq!(f(Format::Extended), "2023-06-01T12:00:00-05:30");
        assert_eq!(f(Format::Basic), "20230601T120000-0530");
        assert_eq!(f(Format::Date), "2023-06-01");
        assert_eq!(f(Format::Time), "12:00:00-05:30");
        // Epoch values are of the UTC instant, 17:30Z.
        assert_eq!(f(Format::UnixSeconds), "1685640600");
        assert_eq!(
            super::format(ticks, Some(TimeSpan::ZERO), Format::Iso8601),
            "2023-06-01T12:00:00+00:00"
        );
    }

    #[test]
    fn test_trimmed_fraction() {
        let base = ticks_from_date(2023, 1, 15);
        let f = |extra| super::format(base + extra, None, Format::PreciseTrimmed);
        assert_eq!(f(0), "2023-01-15T00:00:00.0Z");
        assert_eq!(f(5_000_000), "2023-01-15T00:00:00.5Z");
        assert_eq!(f(1_200_000), "2023-01-15T00:00:00.12Z");
        assert_eq!(f(1), "2023-01-15T00:00:00.0000001Z");
    }

    #[test]
    fn test_fixed_width_fraction_padding() {
        let base = ticks_from_date(2023, 1, 15);
        assert_eq!(super::format(base + 10_000, None, Format::Millis), "2023-01-15T00:00:00.001Z");
        assert_eq!(super::format(base + 10, None, Format::Micros), "2023-01-15T00:00:00.000001Z");
        assert_eq!(super::format(base + 1, None, Format::Precise), "2023-01-15T00:00:00.0000001Z");
    }

    const ALL_FORMATS: [Format; 11] = [
        Format::Iso8601,
        Format::Precise,
        Format::PreciseTrimmed,
        Format::Millis,
        Format::Micros,
        Format::Extended,
        Format::Basic,
        Format::Date,
        Format::Time,
        Format::UnixSeconds,
        Format::UnixMilliseconds,
    ];

    #[derive(Debug, Clone, Copy)]
    struct ValidOffset(i32);

    impl Arbitrary for ValidOffset {
        fn arbitrary(g: &mut Gen) -> Self {
            Self(i32::from(u16::arbitrary(g) % 1681) - 840)
        }
    }

    /// Rewrites every two-digit field of an extended string without its
    /// leading zero, which only the flexible path accepts.
    fn unpadded(text: &str) -> String {
        let (date, rest) = text.split_at(10);
        let strip = |s: &str| s.strip_prefix('0').filter(|s| !s.is_empty()).unwrap_or(s).to_owned();
        let parts: Vec<String> = date.split('-').map(|p| p.to_owned()).collect();
        let mut out = format!("{}-{}-{}", parts[0], strip(&parts[1]), strip(&parts[2]));
        if let Some(time) = rest.strip_prefix('T') {
            let (clock, tail) = time.split_at(8);
            let fields: Vec<String> = clock.split(':').map(strip).collect();
            out.push('T');
            out.push_str(&fields.join(":"));
            out.push_str(tail);
        }
        out
    }

    quickcheck! {
        fn prop_precise_round_trip(t: ValidTicks) -> bool {
            let text = super::format(t.0, None, Format::Precise);
            ticks_of(&text) == Some(t.0)
        }

        fn prop_fast_and_flexible_agree(t: ValidTicks) -> bool {
            let text = super::format(t.0, None, Format::Precise);
            let fast = parse_fast(text.as_bytes());
            let flexible = parse_flexible(&text).ok();
            fast.is_some() && fast == flexible
        }

        fn prop_unpadded_fields_match_fast_path(t: ValidTicks) -> bool {
            let text = super::format(t.0, None, Format::Precise);
            let short = unpadded(&text);
            parse_flexible(&short).ok().map(|p| p.ticks) == parse_fast(text.as_bytes()).map(|p| p.ticks)
        }

        fn prop_basic_matches_extended(t: ValidTicks, o: ValidOffset) -> bool {
            let offset = Some(TimeSpan::from_minutes_i32(o.0));
            let basic = parse(&super::format(t.0, offset, Format::Basic)).ok();
            let extended = parse(&super::format(t.0, offset, Format::Iso8601)).ok();
            basic.is_some() && basic == extended
        }

        fn prop_any_ticks_format_without_panicking(ticks: i64, o: ValidOffset) -> bool {
            let offset = Some(TimeSpan::from_minutes_i32(o.0));
            ALL_FORMATS.iter().all(|&f| {
                !super::format(ticks, None, f).is_empty() && !super::format(ticks, offset, f).is_empty()
            })
        }

        fn prop_date_only_is_midnight(t: ValidTicks) -> bool {
            let text = super::format(t.0, None, Format::Date);
            ticks_of(&text) == Some(t.0 - t.0 % TICKS_PER_DAY)
        }
    }
}
