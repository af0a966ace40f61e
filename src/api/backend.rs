//! Backend abstraction for experience data.
//!
//! [`ExperienceApi`] is the seam between view controllers and the network:
//! production code talks to [`HttpBackend`], tests substitute an in-memory
//! fake. The trait is object safe so controllers can hold
//! `Arc<dyn ExperienceApi>`.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::api::client::HttpClient;
use crate::api::loading::LoadingCounter;
use crate::domain::{Experience, ExperiencePatch, Location, Result};
use crate::search::{ResultPage, SearchQuery};

/// Filter option summaries returned alongside search results.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub price_range: Option<PriceRange>,
}

/// Bounds of the price slider offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// One page of search results plus the facets for refining them.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub page: ResultPage<Experience>,
    pub facets: Option<Facets>,
}

/// Parameters for an availability check on a single experience.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub participants: u32,
}

impl AvailabilityQuery {
    fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("startDate", self.start_date.to_string()),
            ("endDate", self.end_date.to_string()),
            ("participants", self.participants.to_string()),
        ]
    }
}

/// Availability check verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AvailabilityCheck {
    pub available: bool,
}

/// Paged payload shape shared by the list and search endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PagePayload {
    experiences: Vec<Experience>,
    total: usize,
    total_pages: usize,
    #[serde(default)]
    filters: Option<Facets>,
}

impl PagePayload {
    fn into_page(self) -> ResultPage<Experience> {
        ResultPage {
            items: self.experiences,
            total_count: self.total,
            total_pages: self.total_pages,
        }
    }
}

/// Operations the experience backend exposes.
#[async_trait]
pub trait ExperienceApi: Send + Sync {
    /// Fetches a filtered, paginated listing.
    async fn list(&self, query: &SearchQuery) -> Result<ResultPage<Experience>>;

    /// Runs a search, returning results plus refinement facets.
    async fn search(&self, query: &SearchQuery) -> Result<SearchOutcome>;

    /// Fetches a single experience by id.
    async fn get(&self, id: &str) -> Result<Experience>;

    /// Creates an experience, returning the stored record.
    async fn create(&self, draft: &Experience) -> Result<Experience>;

    /// Applies a partial update, returning the updated record.
    async fn update(&self, id: &str, patch: &ExperiencePatch) -> Result<Experience>;

    /// Deletes an experience.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Checks whether an experience can host a booking.
    async fn check_availability(
        &self,
        id: &str,
        query: &AvailabilityQuery,
    ) -> Result<AvailabilityCheck>;

    /// Fetches the known location records for autocompletion.
    async fn locations(&self) -> Result<Vec<Location>>;

    /// Counter of requests this backend currently has in flight.
    fn loading(&self) -> LoadingCounter;
}

/// Production backend speaking to the REST API.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: HttpClient,
}

impl HttpBackend {
    pub fn new(config: &crate::Config) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(config)?,
        })
    }
}

#[async_trait]
impl ExperienceApi for HttpBackend {
    async fn list(&self, query: &SearchQuery) -> Result<ResultPage<Experience>> {
        let payload: PagePayload = self
            .client
            .get("experiences", &query.to_query_pairs())
            .await?;
        Ok(payload.into_page())
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchOutcome> {
        let payload: PagePayload = self
            .client
            .get("experiences/search", &query.to_query_pairs())
            .await?;
        let facets = payload.filters.clone();
        Ok(SearchOutcome {
            page: payload.into_page(),
            facets,
        })
    }

    async fn get(&self, id: &str) -> Result<Experience> {
        self.client.get(&format!("experiences/{id}"), &[]).await
    }

    async fn create(&self, draft: &Experience) -> Result<Experience> {
        self.client.post("experiences", draft).await
    }

    async fn update(&self, id: &str, patch: &ExperiencePatch) -> Result<Experience> {
        self.client.put(&format!("experiences/{id}"), patch).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&format!("experiences/{id}")).await
    }

    async fn check_availability(
        &self,
        id: &str,
        query: &AvailabilityQuery,
    ) -> Result<AvailabilityCheck> {
        self.client
            .get(
                &format!("experiences/{id}/availability"),
                &query.to_query_pairs(),
            )
            .await
    }

    async fn locations(&self) -> Result<Vec<Location>> {
        self.client.get("locations", &[]).await
    }

    fn loading(&self) -> LoadingCounter {
        self.client.loading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_payload_maps_to_result_page() {
        let payload: PagePayload = serde_json::from_value(serde_json::json!({
            "experiences": [],
            "total": 25,
            "totalPages": 3,
            "filters": {
                "locations": [
                    { "id": "loc-1", "name": "Paris", "country": "France", "city": "Paris" }
                ],
                "categories": ["adventure"],
                "priceRange": { "min": 10.0, "max": 250.0 }
            }
        }))
        .unwrap();
        let facets = payload.filters.clone().unwrap();
        assert_eq!(facets.locations.len(), 1);
        assert_eq!(facets.locations[0].id.as_deref(), Some("loc-1"));
        assert_eq!(facets.locations[0].name, "Paris");
        assert_eq!(facets.locations[0].country, "France");
        assert_eq!(facets.price_range.unwrap().max, 250.0);
        let page = payload.into_page();
        assert_eq!(page.total_count, 25);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn availability_query_pairs_use_wire_names() {
        let query = AvailabilityQuery {
            start_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 7, 5).unwrap(),
            participants: 3,
        };
        assert_eq!(
            query.to_query_pairs(),
            vec![
                ("startDate", "2024-07-01".to_string()),
                ("endDate", "2024-07-05".to_string()),
                ("participants", "3".to_string()),
            ]
        );
    }
}
