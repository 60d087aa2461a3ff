//! Conversions from raw tag values into friendlier forms.
//!
//! None of these are used while parsing. They're for working with a
//! [`Metadata`] afterwards.

use winnow::{
    ModalResult, Parser,
    error::{ContextError, ErrMode, StrContext},
    token::{one_of, take_while},
};

use crate::Metadata;

/// A calendar date, as found in Exif date-time tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateParts {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

/// Parses the date at the start of an Exif date-time string.
///
/// These look like `YYYY:MM:DD HH:MM:SS`, though plenty of software writes
/// `/`, `-`, or a space between the date's parts instead. Anything after the
/// day is ignored.
///
/// Returns `None` if the date isn't a real calendar date.
///
/// ```
/// use jpeg_meta::convert::{DateParts, parse_date};
///
/// assert_eq!(
///     parse_date("2024:02:29 13:37:00"),
///     Some(DateParts { year: 2024, month: 2, day: 29 })
/// );
/// assert_eq!(parse_date("2023:02:29 13:37:00"), None);
/// ```
pub fn parse_date(s: &str) -> Option<DateParts> {
    let mut input: &str = s;
    let (year, _, month, _, day) = (
        number(4).context(StrContext::Label("year")),
        separator,
        number(2).context(StrContext::Label("month")),
        separator,
        number(2).context(StrContext::Label("day")),
    )
        .parse_next(&mut input)
        .inspect_err(|e| log::trace!("Couldn't parse date `{s}`. err: {e:?}"))
        .ok()?;

    let month = u8::try_from(month).ok()?;
    let day = u8::try_from(day).ok()?;

    let last_day = days_in_month(month, year)?;
    if day == 0 || day > last_day {
        log::trace!("Date `{s}` has a day that isn't in its month.");
        return None;
    }

    Some(DateParts { year, month, day })
}

/// Exactly `count` decimal digits.
fn number<'i>(count: usize) -> impl Parser<&'i str, u16, ErrMode<ContextError>> {
    take_while(count, |c: char| c.is_ascii_digit()).try_map(str::parse::<u16>)
}

fn separator(input: &mut &str) -> ModalResult<char, ContextError> {
    one_of([':', '/', '-', ' '])
        .context(StrContext::Label("separator"))
        .parse_next(input)
}

/// How many days the month has in the given year.
///
/// `None` if `month` isn't `1..=12`.
pub const fn days_in_month(month: u8, year: u16) -> Option<u8> {
    let days = match month {
        1 => 31,
        2 if is_leap_year(year) => 29,
        2 => 28,
        3 => 31,
        4 => 30,
        5 => 31,
        6 => 30,
        7 => 31,
        8 => 31,
        9 => 30,
        10 => 31,
        11 => 30,
        12 => 31,
        _ => return None,
    };

    Some(days)
}

const fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Converts a GPS coordinate into signed decimal degrees.
///
/// `coordinate` is the decoded `GPSLatitude` or `GPSLongitude` value: up to
/// three `n/d` rationals for degrees, minutes, and seconds. `reference` is the
/// matching `...Ref` value (`N`, `S`, `E`, or `W`). South and west are
/// negative.
///
/// ```
/// use jpeg_meta::convert::gps_to_decimal;
///
/// assert_eq!(gps_to_decimal("40/1,30/1,0/1", "N"), Some(40.5));
/// assert_eq!(gps_to_decimal("40/1,30/1,0/1", "W"), Some(-40.5));
/// assert_eq!(gps_to_decimal("40/0,30/1,0/1", "N"), None);
/// ```
pub fn gps_to_decimal(coordinate: &str, reference: &str) -> Option<f64> {
    let sign: f64 = match reference.chars().next()?.to_ascii_uppercase() {
        'N' | 'E' => 1.0,
        'S' | 'W' => -1.0,
        other => {
            log::trace!("Unknown GPS reference `{other}`.");
            return None;
        }
    };

    let mut degrees = 0.0_f64;
    let mut scale = 1.0_f64;
    for (i, part) in coordinate.split(',').enumerate() {
        // degrees, minutes, seconds
        if i >= 3 {
            log::trace!("GPS coordinate `{coordinate}` has too many parts.");
            return None;
        }

        let (numerator, denominator) = part.trim().split_once('/')?;
        let numerator: u32 = numerator.trim().parse().ok()?;
        let denominator: u32 = denominator.trim().parse().ok()?;
        if denominator == 0 {
            return None;
        }

        degrees += f64::from(numerator) / f64::from(denominator) / scale;
        scale *= 60.0;
    }

    Some(sign * degrees)
}

/// How far an image must be rotated clockwise to display upright, given its
/// Exif `Orientation`.
///
/// Mirrored orientations report `0`, as flipping isn't a rotation.
///
/// ```
/// use jpeg_meta::convert::rotation_degrees;
///
/// assert_eq!(rotation_degrees(6), Some(90));
/// assert_eq!(rotation_degrees(8), Some(-90));
/// assert_eq!(rotation_degrees(9), None);
/// ```
pub const fn rotation_degrees(orientation: u32) -> Option<i16> {
    match orientation {
        1 | 2 | 4 | 5 | 7 => Some(0),
        3 => Some(180),
        6 => Some(90),
        8 => Some(-90),
        _ => None,
    }
}

impl Metadata {
    /// The Exif `Orientation`, if there is one.
    pub fn orientation(&self) -> Option<u32> {
        self.exif.get("Orientation")?.as_integer()
    }

    /// When the photo was taken.
    ///
    /// Uses `DateTimeOriginal`, falling back to `DateTime` (which is really
    /// the last time the file was changed).
    pub fn date_taken(&self) -> Option<DateParts> {
        ["DateTimeOriginal", "DateTime"]
            .into_iter()
            .filter_map(|name| self.exif.get(name)?.as_str())
            .find_map(parse_date)
    }

    /// Latitude in decimal degrees. Negative is south.
    pub fn latitude(&self) -> Option<f64> {
        self.gps_coordinate("GPSLatitude", "GPSLatitudeRef")
    }

    /// Longitude in decimal degrees. Negative is west.
    pub fn longitude(&self) -> Option<f64> {
        self.gps_coordinate("GPSLongitude", "GPSLongitudeRef")
    }

    fn gps_coordinate(&self, coordinate: &str, reference: &str) -> Option<f64> {
        gps_to_decimal(
            self.gps.get(coordinate)?.as_str()?,
            self.gps.get(reference)?.as_str()?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{DateParts, days_in_month, gps_to_decimal, parse_date, rotation_degrees};
    use crate::{Metadata, Value, util::logger};

    #[test]
    fn dates() {
        logger();

        let d = |year, month, day| Some(DateParts { year, month, day });

        assert_eq!(parse_date("2019:07:04 10:00:00"), d(2019, 7, 4));
        assert_eq!(parse_date("2019/07/04"), d(2019, 7, 4));
        assert_eq!(parse_date("2019-12-31"), d(2019, 12, 31));
        assert_eq!(parse_date("2019 01 01"), d(2019, 1, 1));

        assert_eq!(parse_date("2019:13:01"), None, "no 13th month");
        assert_eq!(parse_date("2019:00:01"), None);
        assert_eq!(parse_date("2019:04:31"), None, "april has 30 days");
        assert_eq!(parse_date("2019:04:00"), None);
        assert_eq!(parse_date("19:04:01"), None);
        assert_eq!(parse_date("2019.04.01"), None);
        assert_eq!(parse_date("    :  :     "), None, "blank dates happen");
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn leap_years() {
        assert_eq!(days_in_month(2, 2024), Some(29));
        assert_eq!(days_in_month(2, 2023), Some(28));
        assert_eq!(days_in_month(2, 1900), Some(28));
        assert_eq!(days_in_month(2, 2000), Some(29));
        assert_eq!(days_in_month(0, 2000), None);
        assert_eq!(days_in_month(13, 2000), None);
    }

    #[test]
    fn gps() {
        logger();

        let close = |a: Option<f64>, b: f64| (a.unwrap() - b).abs() < 1e-9;

        assert!(close(gps_to_decimal("51/1,30/1,36/1", "N"), 51.51));
        assert!(close(gps_to_decimal("0/1,7/1,12/1", "w"), -0.12));
        assert!(close(gps_to_decimal("33/1", "S"), -33.0));

        assert_eq!(gps_to_decimal("1/1,2/1,3/1,4/1", "N"), None);
        assert_eq!(gps_to_decimal("1/1,2/0", "N"), None);
        assert_eq!(gps_to_decimal("1,2,3", "N"), None);
        assert_eq!(gps_to_decimal("1/1", "X"), None);
        assert_eq!(gps_to_decimal("1/1", ""), None);
    }

    #[test]
    fn rotations() {
        let table: Vec<Option<i16>> = (0..=9).map(rotation_degrees).collect();
        assert_eq!(
            table,
            [
                None,
                Some(0),
                Some(0),
                Some(180),
                Some(0),
                Some(0),
                Some(90),
                Some(0),
                Some(-90),
                None
            ]
        );
    }

    #[test]
    fn metadata_helpers() {
        logger();

        let mut metadata = Metadata::default();
        assert_eq!(metadata.orientation(), None);
        assert_eq!(metadata.date_taken(), None);
        assert_eq!(metadata.latitude(), None);

        metadata.exif.insert("Orientation".into(), Value::Integer(6));
        metadata
            .exif
            .insert("DateTime".into(), Value::Text("2020:01:02 03:04:05".into()));
        metadata.gps.insert(
            "GPSLongitude".into(),
            Value::Rational("122/1,25/1,0/1".into()),
        );
        metadata
            .gps
            .insert("GPSLongitudeRef".into(), Value::Text("W".into()));

        assert_eq!(metadata.orientation(), Some(6));
        assert_eq!(
            metadata.date_taken(),
            Some(DateParts {
                year: 2020,
                month: 1,
                day: 2
            })
        );
        assert!((metadata.longitude().unwrap() + 122.416_666_666).abs() < 1e-6);
        assert_eq!(metadata.latitude(), None);

        // the original date wins
        metadata.exif.insert(
            "DateTimeOriginal".into(),
            Value::Text("2019:12:31 23:59:59".into()),
        );
        assert_eq!(metadata.date_taken().map(|d| d.year), Some(2019));
    }
}
