//! Per-row rendering of SQL literals. Embedded single quotes are not escaped.

use chrono::NaiveDate;
use std::fmt;
use tracing::warn;

use crate::{error::ConvertError, records::SaleRecord};

const SOURCE_DATE_FORMAT: &str = "%m/%d/%Y";
const SQL_DATE_FORMAT: &str = "%Y-%m-%d";

/// A single value in a VALUES tuple.
#[derive(Debug)]
pub enum Literal<'a> {
    /// Emitted as `'text'`.
    Quoted(&'a str),
    /// Emitted as-is.
    Raw(&'a str),
    /// Emitted as `'YYYY-MM-DD'`.
    Date(NaiveDate),
}

impl fmt::Display for Literal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Quoted(s) => write!(f, "'{s}'"),
            Literal::Raw(s) => f.write_str(s),
            Literal::Date(d) => write!(f, "'{}'", d.format(SQL_DATE_FORMAT)),
        }
    }
}

/// Parses a `MM/DD/YYYY` sale date. Month and day may omit the leading zero.
pub fn parse_sale_date(value: &str, line: u64) -> Result<NaiveDate, ConvertError> {
    let invalid = |source| ConvertError::InvalidDate {
        line,
        value: value.to_owned(),
        source,
    };

    // chrono's %Y accepts any width and a sign, and skips leading whitespace.
    if !has_date_shape(value) {
        return Err(invalid(None));
    }
    NaiveDate::parse_from_str(value, SOURCE_DATE_FORMAT).map_err(|e| invalid(Some(e)))
}

/// `M/D/YYYY` with one or two digit month and day and a four digit year.
fn has_date_shape(value: &str) -> bool {
    let digits = |part: &str, min: usize, max: usize| {
        (min..=max).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
    };

    match value.split('/').collect::<Vec<_>>().as_slice() {
        [month, day, year] => {
            digits(*month, 1, 2) && digits(*day, 1, 2) && digits(*year, 4, 4)
        }
        _ => false,
    }
}

/// Literals for all 17 columns, in table column order.
pub fn literals(record: &SaleRecord) -> Result<Vec<Literal<'_>>, ConvertError> {
    let sale_date = parse_sale_date(&record.sale_date, record.line)?;

    let values = vec![
        quoted(record, "invoice_id", &record.invoice_id),
        quoted(record, "branch", &record.branch),
        quoted(record, "city", &record.city),
        quoted(record, "customer_type", &record.customer_type),
        quoted(record, "gender", &record.gender),
        quoted(record, "product_line", &record.product_line),
        Literal::Raw(&record.unit_price),
        Literal::Raw(&record.quantity),
        Literal::Raw(&record.tax_5_percent),
        Literal::Raw(&record.total),
        Literal::Date(sale_date),
        quoted(record, "sale_time", &record.sale_time),
        quoted(record, "payment", &record.payment),
        Literal::Raw(&record.cogs),
        Literal::Raw(&record.gross_margin_percentage),
        Literal::Raw(&record.gross_income),
        Literal::Raw(&record.rating),
    ];

    Ok(values)
}

/// The comma-separated body of a VALUES tuple, without parentheses.
pub fn format_values(record: &SaleRecord) -> Result<String, ConvertError> {
    let rendered: Vec<String> = literals(record)?
        .iter()
        .map(ToString::to_string)
        .collect();
    Ok(rendered.join(", "))
}

fn quoted<'a>(record: &SaleRecord, column: &str, value: &'a str) -> Literal<'a> {
    if value.contains('\'') {
        warn!(
            line = record.line,
            column,
            value,
            "single quote written unescaped; resulting SQL will not parse"
        );
    }
    Literal::Quoted(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_sale_date(value: &str, line: u64) -> Result<String, ConvertError> {
        parse_sale_date(value, line).map(|d| Literal::Date(d).to_string())
    }

    fn sample() -> SaleRecord {
        SaleRecord {
            line: 2,
            invoice_id: "750-67-8428".into(),
            branch: "A".into(),
            city: "Yangon".into(),
            customer_type: "Member".into(),
            gender: "Female".into(),
            product_line: "Health and beauty".into(),
            unit_price: "74.69".into(),
            quantity: "7".into(),
            tax_5_percent: "26.1415".into(),
            total: "548.9715".into(),
            sale_date: "1/5/2019".into(),
            sale_time: "13:08".into(),
            payment: "Ewallet".into(),
            cogs: "522.83".into(),
            gross_margin_percentage: "4.761904762".into(),
            gross_income: "26.1415".into(),
            rating: "9.1".into(),
        }
    }

    #[test]
    fn formats_sample_row() {
        let values = format_values(&sample()).unwrap();

        assert_eq!(
            values,
            "'750-67-8428', 'A', 'Yangon', 'Member', 'Female', 'Health and beauty', \
             74.69, 7, 26.1415, 548.9715, '2019-01-05', '13:08', 'Ewallet', \
             522.83, 4.761904762, 26.1415, 9.1"
        );
    }

    #[test]
    fn padded_date() {
        assert_eq!(format_sale_date("01/31/2023", 2).unwrap(), "'2023-01-31'");
    }

    #[test]
    fn unpadded_date() {
        assert_eq!(format_sale_date("3/8/2019", 2).unwrap(), "'2019-03-08'");
    }

    #[test]
    fn rejects_iso_date() {
        let err = format_sale_date("2019-01-05", 7).unwrap_err();

        match err {
            ConvertError::InvalidDate { line, value, .. } => {
                assert_eq!(line, 7);
                assert_eq!(value, "2019-01-05");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_impossible_and_empty_dates() {
        assert!(format_sale_date("02/30/2019", 2).is_err());
        assert!(format_sale_date("13/01/2019", 2).is_err());
        assert!(format_sale_date("", 2).is_err());
        assert!(format_sale_date("1/5/2019 13:08", 2).is_err());
    }

    #[test]
    fn rejects_loose_date_shapes() {
        for value in [
            "1/5/19",
            " 1/5/2019",
            "1/ 5/2019",
            "1/5/2019 ",
            "01/05/+2019",
            "1/5/-2019",
            "+1/5/2019",
            "001/05/2019",
            "1/5/20190",
            "1//2019",
        ] {
            let err = format_sale_date(value, 4).unwrap_err();
            assert!(
                matches!(err, ConvertError::InvalidDate { line: 4, source: None, .. }),
                "{value:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn impossible_date_keeps_parse_error() {
        let err = format_sale_date("02/30/2019", 2).unwrap_err();

        assert!(matches!(
            err,
            ConvertError::InvalidDate { source: Some(_), .. }
        ));
    }

    #[test]
    fn bad_date_fails_whole_row() {
        let mut record = sample();
        record.sale_date = "5 Jan 2019".into();

        assert!(matches!(
            format_values(&record),
            Err(ConvertError::InvalidDate { line: 2, .. })
        ));
    }

    #[test]
    fn string_columns_quoted_numeric_columns_bare() {
        let record = sample();
        let values = literals(&record).unwrap();

        let quoted_idx = [0, 1, 2, 3, 4, 5, 11, 12];
        for (i, value) in values.iter().enumerate() {
            let text = value.to_string();
            let is_quoted = text.starts_with('\'') && text.ends_with('\'');
            if quoted_idx.contains(&i) || i == 10 {
                assert!(is_quoted, "column {i} should be quoted: {text}");
            } else {
                assert!(!is_quoted, "column {i} should be bare: {text}");
            }
        }
        assert_eq!(values.len(), 17);
    }

    #[test]
    fn numeric_text_is_not_normalised() {
        let mut record = sample();
        record.unit_price = "074.690".into();
        record.quantity = "n/a".into();

        let values = format_values(&record).unwrap();

        assert!(values.contains(", 074.690, n/a, "));
    }

    #[test]
    fn embedded_quote_is_left_unescaped() {
        let mut record = sample();
        record.product_line = "Kid's toys".into();

        let values = format_values(&record).unwrap();

        assert!(values.contains("'Kid's toys'"));
    }
}
