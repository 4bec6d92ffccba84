/// Ticks in one millisecond (one tick is 100 nanoseconds)
pub const TICKS_PER_MILLISECOND: i64 = 10_000;
/// Ticks in one microsecond
pub const TICKS_PER_MICROSECOND: i64 = 10;
/// Ticks in one second
pub const TICKS_PER_SECOND: i64 = 1_000 * TICKS_PER_MILLISECOND;
/// Ticks in one minute
pub const TICKS_PER_MINUTE: i64 = 60 * TICKS_PER_SECOND;
/// Ticks in one hour
pub const TICKS_PER_HOUR: i64 = 60 * TICKS_PER_MINUTE;
/// Ticks in one day
pub const TICKS_PER_DAY: i64 = 24 * TICKS_PER_HOUR;

/// Minimum valid year (inclusive)
pub const MIN_YEAR: i32 = 1;
/// Maximum valid year (inclusive)
pub const MAX_YEAR: i32 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: i32 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: i32 = 1;

/// Month number for January
pub const JANUARY: i32 = 1;
/// Month number for February
pub const FEBRUARY: i32 = 2;
/// Month number for December
pub const DECEMBER: i32 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: i32 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [i32; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;

/// Days in a common year
pub(crate) const DAYS_PER_YEAR: i64 = 365;
/// Days in a 4-year cycle (one leap day)
pub(crate) const DAYS_PER_4_YEARS: i64 = 4 * DAYS_PER_YEAR + 1;
/// Days in a 100-year period (the century year is not a leap year)
pub(crate) const DAYS_PER_100_YEARS: i64 = 25 * DAYS_PER_4_YEARS - 1;
/// Days in a 400-year cycle (the fourth century year is a leap year)
pub(crate) const DAYS_PER_400_YEARS: i64 = 4 * DAYS_PER_100_YEARS + 1;

/// Ticks of 0001-01-01T00:00:00
pub const MIN_TICKS: i64 = 0;
/// Ticks of 9999-12-31T23:59:59.9999999
pub const MAX_TICKS: i64 = 3_652_059 * TICKS_PER_DAY - 1;

/// Ticks of the Unix epoch, 1970-01-01T00:00:00Z
pub const UNIX_EPOCH_TICKS: i64 = 719_162 * TICKS_PER_DAY;
/// Ticks of the Windows FILETIME epoch, 1601-01-01T00:00:00Z
pub const FILETIME_EPOCH_TICKS: i64 = 584_388 * TICKS_PER_DAY;

/// Largest UTC offset magnitude accepted as valid, 14 hours
pub const MAX_OFFSET_TICKS: i64 = 14 * TICKS_PER_HOUR;
/// Largest offset hour accepted by the parser
pub(crate) const MAX_OFFSET_HOURS: i32 = 14;

/// Number of fractional second digits carried by a tick
pub(crate) const FRACTION_DIGITS: usize = 7;

/// Date component separator (ISO 8601 extended format)
pub const DATE_SEPARATOR: char = '-';
/// Time component separator (ISO 8601 extended format)
pub const TIME_SEPARATOR: char = ':';
/// Separator between the date and the time of day
pub const DATE_TIME_SEPARATOR: char = 'T';
/// Fractional second marker
pub const FRACTION_SEPARATOR: char = '.';
/// UTC designator
pub const UTC_DESIGNATOR: char = 'Z';
