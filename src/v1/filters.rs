/*
 * Copyright (c) 2025 The gphotos Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v1::errors::GooglePhotosError;
use crate::v1::parsers::is_false;
use chrono::{Datelike, NaiveDate};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use strum_macros::{EnumString, IntoStaticStr};

/// Media type constraint for media item search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, EnumString, IntoStaticStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaType {
    AllMedia,
    Photo,
    Video,
}

/// Content categories the search endpoint can include or exclude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, EnumString, IntoStaticStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentCategory {
    Animals,
    Birthdays,
    Cityscapes,
    Documents,
    Fashion,
    Food,
    Gardens,
    Landmarks,
    Landscapes,
    Night,
    People,
    Performances,
    Pets,
    Receipts,
    Screenshots,
    Selfies,
    Sport,
    Travel,
    Utility,
    Weddings,
    Whiteboards,
}

/// Item features the search endpoint can include or exclude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, EnumString, IntoStaticStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Feature {
    Favorites,
    Archived,
}

/// A (possibly partial) calendar date. The year is required; month and day
/// are omitted from the wire form when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApiDate {
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
}

impl ApiDate {
    /// A year-only date, matching every item from that year
    pub fn year(year: i32) -> Self {
        Self {
            year,
            month: None,
            day: None,
        }
    }

    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self {
            year,
            month: Some(month),
            day: Some(day),
        }
    }
}

impl From<NaiveDate> for ApiDate {
    // Calendar fields are copied verbatim; no timezone arithmetic
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: Some(date.month()),
            day: Some(date.day()),
        }
    }
}

/// An inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Serialize for DateRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("DateRange", 2)?;
        s.serialize_field("startDate", &ApiDate::from(self.start))?;
        s.serialize_field("endDate", &ApiDate::from(self.end))?;
        s.end()
    }
}

/// Calendar-date constraints. Exact dates and ranges may be combined; both
/// expand to the API's nested year/month/day objects.
#[derive(Debug, Default, Clone)]
pub struct DateFilter {
    pub dates: Vec<ApiDate>,
    pub ranges: Vec<DateRange>,
}

/// Feature constraints; included and excluded lists act independently.
#[derive(Debug, Default, Clone)]
pub struct FeatureFilter {
    pub included: Vec<Feature>,
    pub excluded: Vec<Feature>,
}

/// Search constraints for `mediaItems:search`.
#[derive(Debug, Default, Clone)]
pub struct SearchFilters {
    /// Restrict the search to one album. The API does not allow combining
    /// this with the other filters; it is passed through as given.
    pub album_id: Option<String>,
    pub media_types: Vec<MediaType>,
    pub included_categories: Vec<ContentCategory>,
    pub excluded_categories: Vec<ContentCategory>,
    pub include_archived_media: bool,
    pub exclude_non_app_created_data: bool,
    pub date_filter: Option<DateFilter>,
    pub feature_filter: Option<FeatureFilter>,
}

impl SearchFilters {
    /// Builds the nested `filters` object of the search body, or `None`
    /// when no constraint beyond the album is set.
    pub(crate) fn filter_body(&self) -> Result<Option<serde_json::Value>, GooglePhotosError> {
        let set = FilterSet {
            media_type_filter: (!self.media_types.is_empty()).then(|| MediaTypeFilterBody {
                media_types: self.media_types.clone(),
            }),
            content_filter: (!self.included_categories.is_empty()
                || !self.excluded_categories.is_empty())
            .then(|| ContentFilterBody {
                included_content_categories: self.included_categories.clone(),
                excluded_content_categories: self.excluded_categories.clone(),
            }),
            date_filter: self.date_filter.as_ref().map(|f| DateFilterBody {
                dates: f.dates.clone(),
                ranges: f.ranges.clone(),
            }),
            feature_filter: self.feature_filter.as_ref().map(|f| FeatureFilterBody {
                included_features: f.included.clone(),
                excluded_features: f.excluded.clone(),
            }),
            include_archived_media: self.include_archived_media,
            exclude_non_app_created_data: self.exclude_non_app_created_data,
        };
        if set.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::to_value(&set)?))
    }
}

// Wire form of the nested `filters` search body object
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct FilterSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    media_type_filter: Option<MediaTypeFilterBody>,

    #[serde(skip_serializing_if = "Option::is_none")]
    content_filter: Option<ContentFilterBody>,

    #[serde(skip_serializing_if = "Option::is_none")]
    date_filter: Option<DateFilterBody>,

    #[serde(skip_serializing_if = "Option::is_none")]
    feature_filter: Option<FeatureFilterBody>,

    #[serde(skip_serializing_if = "is_false")]
    include_archived_media: bool,

    #[serde(skip_serializing_if = "is_false")]
    exclude_non_app_created_data: bool,
}

impl FilterSet {
    fn is_empty(&self) -> bool {
        self.media_type_filter.is_none()
            && self.content_filter.is_none()
            && self.date_filter.is_none()
            && self.feature_filter.is_none()
            && !self.include_archived_media
            && !self.exclude_non_app_created_data
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct MediaTypeFilterBody {
    media_types: Vec<MediaType>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ContentFilterBody {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    included_content_categories: Vec<ContentCategory>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    excluded_content_categories: Vec<ContentCategory>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct DateFilterBody {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    dates: Vec<ApiDate>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    ranges: Vec<DateRange>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct FeatureFilterBody {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    included_features: Vec<Feature>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    excluded_features: Vec<Feature>,
}
