use serde::Deserialize;

use crate::entities::dao::NewShow;

/// Fields submitted by the new-show form. The ids come from text inputs, so
/// a non-numeric value is rejected at extraction time.
#[derive(Debug, Clone, Deserialize)]
pub struct ShowForm {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: String,
}

impl ShowForm {
    /// `None` if the start time does not parse in any accepted format.
    pub fn into_new_show(self) -> Option<NewShow> {
        Some(NewShow {
            venue_id: self.venue_id,
            artist_id: self.artist_id,
            start_time: super::parse_start_time(&self.start_time)?,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn converts_with_parseable_start_time() {
        let show = ShowForm {
            artist_id: 4,
            venue_id: 1,
            start_time: "2035-06-15T20:00".to_owned(),
        }
        .into_new_show()
        .unwrap();
        assert_eq!(show.venue_id, 1);
        assert_eq!(show.artist_id, 4);
    }

    #[test]
    fn rejects_unparseable_start_time() {
        let form = ShowForm {
            artist_id: 4,
            venue_id: 1,
            start_time: "whenever".to_owned(),
        };
        assert!(form.into_new_show().is_none());
    }
}
