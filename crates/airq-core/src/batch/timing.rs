use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub(crate) fn update_time_bounds(
    first: &mut Option<OffsetDateTime>,
    last: &mut Option<OffsetDateTime>,
    time: Option<OffsetDateTime>,
) {
    let Some(time) = time else {
        return;
    };
    if first.is_none_or(|existing| time < existing) {
        *first = Some(time);
    }
    if last.is_none_or(|existing| time > existing) {
        *last = Some(time);
    }
}

pub(crate) fn to_rfc3339(time: Option<OffsetDateTime>) -> Option<String> {
    time.and_then(|dt| dt.format(&Rfc3339).ok())
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::{to_rfc3339, update_time_bounds};

    fn at(secs: i64) -> Option<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp(secs).ok()
    }

    #[test]
    fn bounds_track_min_and_max_out_of_order() {
        let mut first = None;
        let mut last = None;
        for secs in [20, 10, 30, 25] {
            update_time_bounds(&mut first, &mut last, at(secs));
        }
        update_time_bounds(&mut first, &mut last, None);
        assert_eq!(first, at(10));
        assert_eq!(last, at(30));
    }

    #[test]
    fn rfc3339_formats_utc() {
        assert_eq!(to_rfc3339(at(0)).as_deref(), Some("1970-01-01T00:00:00Z"));
        assert_eq!(to_rfc3339(None), None);
    }
}
