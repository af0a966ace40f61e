//! Controller behavior against an in-memory backend.
//!
//! These tests run on tokio's paused clock, so the 500ms debounce and the
//! simulated response delays advance instantly and deterministically.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use excursio::api::{
    AvailabilityCheck, AvailabilityQuery, ExperienceApi, LoadingCounter, SearchOutcome,
};
use excursio::controllers::{
    AdminController, DetailController, FormController, FormMode, ListController, Nav,
    NoticeLevel,
};
use excursio::domain::{
    Category, Difficulty, Error, Experience, ExperiencePatch, Location, Result, SortBy,
};
use excursio::form::Field;
use excursio::search::{FilterPatch, Patch, RequestState, ResultPage, SearchQuery};
use excursio::Config;

fn sample(id: &str, title: &str) -> Experience {
    Experience {
        id: Some(id.to_string()),
        title: title.to_string(),
        description: "A guided evening paddle along the coastline with photo stops.".to_string(),
        short_description: "Coastal kayaking".to_string(),
        category: Category::Adventure,
        location: Location {
            name: "Split harbor".to_string(),
            ..Location::default()
        },
        duration: 2.5,
        price: 45.0,
        currency: "USD".to_string(),
        max_participants: 8,
        difficulty: Difficulty::Easy,
        images: vec!["a.jpg".to_string(), "b.jpg".to_string(), "c.jpg".to_string()],
        highlights: Vec::new(),
        included: Vec::new(),
        excluded: Vec::new(),
        meeting_point: "Main pier, gate 4".to_string(),
        languages: vec!["English".to_string()],
        cancellation_policy: "Free cancellation up to 24 hours before the start.".to_string(),
        rating: 4.6,
        review_count: 120,
        is_active: true,
        availability: Vec::new(),
        created_at: None,
        updated_at: None,
    }
}

/// In-memory backend recording every call it receives.
#[derive(Default)]
struct FakeApi {
    items: Mutex<Vec<Experience>>,
    /// Queries seen by `list` and `search`, recorded before any delay.
    queries: Mutex<Vec<SearchQuery>>,
    /// Per-call artificial latency for `list` and `search`.
    delays: Mutex<VecDeque<Duration>>,
    /// When set, each listing response holds one item titled `call-N` so a
    /// test can tell which response ended up on display.
    tag_responses: bool,
    calls: AtomicUsize,
    deletes: Mutex<Vec<String>>,
    creates: Mutex<Vec<Experience>>,
    updates: Mutex<Vec<(String, ExperiencePatch)>>,
    not_found: bool,
    loading: LoadingCounter,
}

impl FakeApi {
    fn with_items(items: Vec<Experience>) -> Self {
        FakeApi {
            items: Mutex::new(items),
            ..FakeApi::default()
        }
    }

    fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    async fn respond(&self, query: &SearchQuery) -> Result<ResultPage<Experience>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.queries.lock().unwrap().push(query.clone());
        let delay = self.delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let items = if self.tag_responses {
            vec![sample("exp-1", &format!("call-{call}"))]
        } else {
            self.items.lock().unwrap().clone()
        };
        let total = items.len();
        Ok(ResultPage::new(items, total, query.page.page_size))
    }
}

#[async_trait]
impl ExperienceApi for FakeApi {
    async fn list(&self, query: &SearchQuery) -> Result<ResultPage<Experience>> {
        self.respond(query).await
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchOutcome> {
        Ok(SearchOutcome {
            page: self.respond(query).await?,
            facets: None,
        })
    }

    async fn get(&self, id: &str) -> Result<Experience> {
        if self.not_found {
            return Err(Error::Server {
                status: Some(404),
                message: "Experience not found".to_string(),
            });
        }
        self.items
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id.as_deref() == Some(id))
            .cloned()
            .ok_or_else(|| Error::Server {
                status: Some(404),
                message: "Experience not found".to_string(),
            })
    }

    async fn create(&self, draft: &Experience) -> Result<Experience> {
        self.creates.lock().unwrap().push(draft.clone());
        let mut created = draft.clone();
        created.id = Some(format!("exp-{}", self.creates.lock().unwrap().len() + 100));
        self.items.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, patch: &ExperiencePatch) -> Result<Experience> {
        self.updates
            .lock()
            .unwrap()
            .push((id.to_string(), patch.clone()));
        let mut items = self.items.lock().unwrap();
        let exp = items
            .iter_mut()
            .find(|e| e.id.as_deref() == Some(id))
            .ok_or_else(|| Error::Server {
                status: Some(404),
                message: "Experience not found".to_string(),
            })?;
        if let Some(is_active) = patch.is_active {
            exp.is_active = is_active;
        }
        if let Some(title) = &patch.title {
            exp.title = title.clone();
        }
        Ok(exp.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.deletes.lock().unwrap().push(id.to_string());
        self.items
            .lock()
            .unwrap()
            .retain(|e| e.id.as_deref() != Some(id));
        Ok(())
    }

    async fn check_availability(
        &self,
        _id: &str,
        query: &AvailabilityQuery,
    ) -> Result<AvailabilityCheck> {
        Ok(AvailabilityCheck {
            available: query.participants <= 8,
        })
    }

    async fn locations(&self) -> Result<Vec<Location>> {
        Ok(vec![
            Location {
                id: Some("loc-1".to_string()),
                name: "Split".to_string(),
                city: "Split".to_string(),
                country: "Croatia".to_string(),
                ..Location::default()
            },
            Location {
                id: Some("loc-2".to_string()),
                name: "Paris".to_string(),
                city: "Paris".to_string(),
                country: "France".to_string(),
                ..Location::default()
            },
        ])
    }

    fn loading(&self) -> LoadingCounter {
        self.loading.clone()
    }
}

fn pair(query: &SearchQuery, key: &str) -> Option<String> {
    query
        .to_query_pairs()
        .into_iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

#[tokio::test(start_paused = true)]
async fn burst_of_filter_edits_issues_one_request() {
    let api = Arc::new(FakeApi::with_items(vec![sample("exp-1", "Kayak")]));
    let mut list =
        ListController::new(Arc::clone(&api) as Arc<dyn ExperienceApi>, &Config::default());

    list.filter(&FilterPatch {
        category: Patch::Set(Category::Nature),
        ..FilterPatch::default()
    });
    list.filter(&FilterPatch {
        difficulty: Patch::Set(Difficulty::Easy),
        ..FilterPatch::default()
    });
    list.filter(&FilterPatch {
        category: Patch::Set(Category::Adventure),
        ..FilterPatch::default()
    });
    list.settle().await;

    assert_eq!(api.query_count(), 1);
    let query = api.queries.lock().unwrap()[0].clone();
    assert_eq!(pair(&query, "category").as_deref(), Some("adventure"));
    assert_eq!(pair(&query, "difficulty").as_deref(), Some("easy"));
    assert_eq!(pair(&query, "page").as_deref(), Some("1"));
    assert_eq!(pair(&query, "limit").as_deref(), Some("12"));
    assert_eq!(list.rows().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn repeating_the_same_filter_does_not_refetch() {
    let api = Arc::new(FakeApi::with_items(vec![sample("exp-1", "Kayak")]));
    let mut list =
        ListController::new(Arc::clone(&api) as Arc<dyn ExperienceApi>, &Config::default());

    let patch = FilterPatch {
        category: Patch::Set(Category::Nature),
        ..FilterPatch::default()
    };
    list.filter(&patch);
    list.settle().await;
    assert_eq!(api.query_count(), 1);

    list.filter(&patch);
    list.settle().await;
    assert_eq!(api.query_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn whitespace_only_search_equals_no_search() {
    let api = Arc::new(FakeApi::with_items(vec![]));
    let mut list =
        ListController::new(Arc::clone(&api) as Arc<dyn ExperienceApi>, &Config::default());

    list.load();
    list.settle().await;
    assert_eq!(api.query_count(), 1);

    list.filter(&FilterPatch {
        search: Patch::Set("   ".to_string()),
        ..FilterPatch::default()
    });
    list.settle().await;

    // Normalized criteria are unchanged, so no second request goes out.
    assert_eq!(api.query_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn slow_stale_response_does_not_overwrite_newer() {
    let api = Arc::new(FakeApi {
        tag_responses: true,
        delays: Mutex::new(VecDeque::from([
            Duration::from_millis(100),
            Duration::from_millis(10),
        ])),
        ..FakeApi::default()
    });
    let mut list =
        ListController::new(Arc::clone(&api) as Arc<dyn ExperienceApi>, &Config::default());

    list.load();
    list.change_page(1);
    list.settle().await;

    // The first request resolved last; its response must have been dropped.
    assert_eq!(api.query_count(), 2);
    let rows = list.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "call-2");
}

#[tokio::test(start_paused = true)]
async fn page_change_keeps_filters_and_fetches_immediately() {
    let api = Arc::new(FakeApi::with_items(vec![sample("exp-1", "Kayak")]));
    let mut list =
        ListController::new(Arc::clone(&api) as Arc<dyn ExperienceApi>, &Config::default());

    list.filter(&FilterPatch {
        category: Patch::Set(Category::Nature),
        ..FilterPatch::default()
    });
    list.settle().await;

    list.change_page(2);
    list.settle().await;

    assert_eq!(api.query_count(), 2);
    let query = api.queries.lock().unwrap()[1].clone();
    assert_eq!(pair(&query, "category").as_deref(), Some("nature"));
    assert_eq!(pair(&query, "page").as_deref(), Some("3"));
}

#[tokio::test(start_paused = true)]
async fn page_size_change_keeps_the_page_index() {
    let api = Arc::new(FakeApi::with_items(vec![sample("exp-1", "Kayak")]));
    let mut list =
        ListController::new(Arc::clone(&api) as Arc<dyn ExperienceApi>, &Config::default());

    list.change_page(2);
    list.settle().await;

    list.change_page_size(24);
    list.settle().await;

    assert_eq!(api.query_count(), 2);
    let query = api.queries.lock().unwrap()[1].clone();
    assert_eq!(pair(&query, "page").as_deref(), Some("3"));
    assert_eq!(pair(&query, "limit").as_deref(), Some("24"));
}

#[tokio::test(start_paused = true)]
async fn spinner_covers_requests_outside_the_search() {
    use excursio::controllers::{ResultsController, SearchSeed};

    let api = Arc::new(FakeApi::with_items(vec![sample("exp-1", "Kayak")]));
    let admin =
        AdminController::new(Arc::clone(&api) as Arc<dyn ExperienceApi>, &Config::default());
    let results = ResultsController::new(
        Arc::clone(&api) as Arc<dyn ExperienceApi>,
        &Config::default(),
        SearchSeed::default(),
    );
    assert!(!admin.is_loading());
    assert!(!results.is_loading());

    // A delete or toggle in flight shows up even with the search idle.
    let guard = api.loading.begin();
    assert!(admin.is_loading());
    assert!(results.is_loading());

    drop(guard);
    assert!(!admin.is_loading());
    assert!(!results.is_loading());
}

#[tokio::test(start_paused = true)]
async fn empty_listing_reports_zero_pages() {
    let api = Arc::new(FakeApi::with_items(vec![]));
    let mut list =
        ListController::new(Arc::clone(&api) as Arc<dyn ExperienceApi>, &Config::default());

    list.load();
    list.settle().await;

    match list.state() {
        RequestState::Success(page) => {
            assert!(page.is_empty());
            assert_eq!(page.total_pages, 0);
        }
        other => panic!("unexpected state: {other:?}"),
    }
    assert!(list.rows().is_empty());
}

#[tokio::test(start_paused = true)]
async fn confirmed_delete_calls_backend_and_refetches() {
    let exp = sample("exp-1", "Kayak");
    let api = Arc::new(FakeApi::with_items(vec![exp.clone()]));
    let mut list =
        ListController::new(Arc::clone(&api) as Arc<dyn ExperienceApi>, &Config::default());

    list.load();
    list.settle().await;

    let pending = list.request_delete(&exp).unwrap();
    assert_eq!(pending.prompt, "Are you sure you want to delete \"Kayak\"?");

    let notice = list.confirm_delete(&pending).await;
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(*api.deletes.lock().unwrap(), vec!["exp-1".to_string()]);

    list.settle().await;
    assert_eq!(api.query_count(), 2);
    assert!(list.rows().is_empty());
}

#[tokio::test(start_paused = true)]
async fn detail_load_failure_navigates_back_with_notice() {
    let api = Arc::new(FakeApi {
        not_found: true,
        ..FakeApi::default()
    });
    let mut detail = DetailController::new(api);

    let (nav, notice) = detail.load("missing").await;
    assert_eq!(nav, Nav::ToList);
    let notice = notice.unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "Failed to load experience details");
    assert!(detail.state().error().is_some());
}

#[tokio::test(start_paused = true)]
async fn detail_gallery_wraps_both_ways() {
    let api = Arc::new(FakeApi::with_items(vec![sample("exp-1", "Kayak")]));
    let mut detail = DetailController::new(api);
    detail.load("exp-1").await;

    assert_eq!(detail.selected_image(), 0);
    detail.previous_image();
    assert_eq!(detail.selected_image(), 2);
    detail.next_image();
    assert_eq!(detail.selected_image(), 0);
    detail.select_image(5);
    assert_eq!(detail.selected_image(), 0);
}

#[tokio::test(start_paused = true)]
async fn admin_toggle_sends_partial_patch_and_refetches() {
    let exp = sample("exp-1", "Kayak");
    let api = Arc::new(FakeApi::with_items(vec![exp.clone()]));
    let mut admin =
        AdminController::new(Arc::clone(&api) as Arc<dyn ExperienceApi>, &Config::default());

    admin.load();
    admin.settle().await;

    let notice = admin.toggle_active(&exp).await;
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(notice.message, "Experience deactivated");

    {
        let updates = api.updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        let (id, patch) = &updates[0];
        assert_eq!(id, "exp-1");
        assert_eq!(patch.is_active, Some(false));
        assert!(patch.title.is_none());
    }

    admin.settle().await;
    assert_eq!(api.query_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn admin_listing_defaults_to_newest_first() {
    let api = Arc::new(FakeApi::with_items(vec![]));
    let mut admin =
        AdminController::new(Arc::clone(&api) as Arc<dyn ExperienceApi>, &Config::default());

    admin.load();
    admin.settle().await;

    let query = api.queries.lock().unwrap()[0].clone();
    assert_eq!(pair(&query, "sortBy").as_deref(), Some("createdAt_desc"));
    assert_eq!(pair(&query, "limit").as_deref(), Some("10"));
}

#[tokio::test(start_paused = true)]
async fn duplicate_creates_an_inactive_copy_and_opens_it() {
    let exp = sample("exp-1", "Kayak");
    let api = Arc::new(FakeApi::with_items(vec![exp.clone()]));
    let mut admin =
        AdminController::new(Arc::clone(&api) as Arc<dyn ExperienceApi>, &Config::default());

    let (nav, notice) = admin.duplicate(&exp).await;
    assert_eq!(notice.level, NoticeLevel::Success);
    assert!(matches!(nav, Nav::ToEdit(_)));

    let creates = api.creates.lock().unwrap();
    assert_eq!(creates.len(), 1);
    assert_eq!(creates[0].title, "Kayak (Copy)");
    assert!(!creates[0].is_active);
    assert!(creates[0].id.is_none());
}

#[tokio::test(start_paused = true)]
async fn form_submit_validates_before_sending() {
    let api = Arc::new(FakeApi::default());
    let mut form =
        FormController::new(Arc::clone(&api) as Arc<dyn ExperienceApi>, FormMode::Create);

    let (nav, notice) = form.submit().await;
    assert_eq!(nav, Nav::Stay);
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(api.creates.lock().unwrap().is_empty());
    // A failed submit reveals the errors on every field.
    assert_eq!(
        form.field_error(Field::Title),
        Some("Title is required".to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn valid_form_creates_and_navigates_to_detail() {
    let api = Arc::new(FakeApi::default());
    let mut form =
        FormController::new(Arc::clone(&api) as Arc<dyn ExperienceApi>, FormMode::Create);

    form.set_value(Field::Title, "Sunset kayak tour");
    form.set_value(Field::ShortDescription, "Paddle into the sunset");
    form.set_value(
        Field::Description,
        "A guided evening paddle along the coastline with a stop for photos and snacks.",
    );
    form.set_value(Field::Location, "Split harbor");
    form.set_value(Field::Duration, "2.5");
    form.set_value(Field::Price, "45");
    form.set_value(Field::MaxParticipants, "8");
    form.set_value(Field::MeetingPoint, "Main pier, gate 4");
    form.set_value(
        Field::CancellationPolicy,
        "Free cancellation up to 24 hours before the start time.",
    );

    let (nav, notice) = form.submit().await;
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(notice.message, "Experience created successfully");
    assert!(matches!(nav, Nav::ToDetail(_)));
    assert_eq!(api.creates.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn editing_populates_the_form_and_updates_in_place() {
    let exp = sample("exp-1", "Kayak");
    let api = Arc::new(FakeApi::with_items(vec![exp]));
    let mut form = FormController::new(
        Arc::clone(&api) as Arc<dyn ExperienceApi>,
        FormMode::Edit("exp-1".to_string()),
    );

    let (nav, notice) = form.load().await;
    assert_eq!(nav, Nav::Stay);
    assert!(notice.is_none());
    assert_eq!(form.form().value(Field::Title), "Kayak");

    form.set_value(Field::Title, "Kayak at dawn");
    let (nav, notice) = form.submit().await;
    assert_eq!(nav, Nav::ToDetail("exp-1".to_string()));
    assert_eq!(notice.message, "Experience updated successfully");

    let updates = api.updates.lock().unwrap();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].1.title.as_deref(), Some("Kayak at dawn"));
}

#[tokio::test(start_paused = true)]
async fn seeded_search_carries_booking_context() {
    use excursio::controllers::results::Layout;
    use excursio::controllers::ResultsController;
    use std::collections::BTreeMap;

    let api = Arc::new(FakeApi::with_items(vec![sample("exp-1", "Kayak")]));

    let mut params = BTreeMap::new();
    params.insert("locationId".to_string(), "paris".to_string());
    params.insert("startDate".to_string(), "2024-06-01".to_string());
    params.insert("participants".to_string(), "2".to_string());
    params.insert("page".to_string(), "2".to_string());
    let seed = excursio::controllers::SearchSeed::from_query_params(&params);

    let mut results = ResultsController::new(
        Arc::clone(&api) as Arc<dyn ExperienceApi>,
        &Config::default(),
        seed,
    );
    results.load();
    results.settle().await;

    let query = api.queries.lock().unwrap()[0].clone();
    assert_eq!(pair(&query, "locationId").as_deref(), Some("paris"));
    assert_eq!(pair(&query, "startDate").as_deref(), Some("2024-06-01"));
    assert_eq!(pair(&query, "participants").as_deref(), Some("2"));
    assert_eq!(pair(&query, "page").as_deref(), Some("2"));
    // Results default to the rating order until the user picks another.
    assert_eq!(pair(&query, "sortBy").as_deref(), Some("rating"));

    assert_eq!(
        results.summary(),
        "Experiences in paris, from Jun 1, 2 participants"
    );
    assert_eq!(results.layout(), Layout::Grid);
    results.set_layout(Layout::List);
    assert_eq!(results.layout(), Layout::List);

    // No facets from the fake, so the default slider bounds apply.
    let range = results.price_range();
    assert_eq!(range.min, 0.0);
    assert_eq!(range.max, 1000.0);

    match results.book("exp-1") {
        Nav::ToBooking {
            id, participants, ..
        } => {
            assert_eq!(id, "exp-1");
            assert_eq!(participants, Some(2));
        }
        other => panic!("unexpected nav: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn clearing_refinements_keeps_the_booking_seed() {
    use excursio::controllers::ResultsController;
    use std::collections::BTreeMap;

    let api = Arc::new(FakeApi::with_items(vec![]));

    let mut params = BTreeMap::new();
    params.insert("locationId".to_string(), "paris".to_string());
    let seed = excursio::controllers::SearchSeed::from_query_params(&params);

    let mut results = ResultsController::new(
        Arc::clone(&api) as Arc<dyn ExperienceApi>,
        &Config::default(),
        seed,
    );
    results.load();
    results.settle().await;

    results.filter(&FilterPatch {
        category: Patch::Set(Category::Nature),
        min_price: Patch::Set(20.0),
        sort_by: Patch::Set(SortBy::PriceAsc),
        ..FilterPatch::default()
    });
    results.settle().await;

    results.clear_filters();
    results.settle().await;

    assert_eq!(api.query_count(), 3);
    let query = api.queries.lock().unwrap()[2].clone();
    assert_eq!(pair(&query, "locationId").as_deref(), Some("paris"));
    assert_eq!(pair(&query, "category"), None);
    assert_eq!(pair(&query, "minPrice"), None);
    assert_eq!(pair(&query, "sortBy").as_deref(), Some("rating"));
}

#[tokio::test(start_paused = true)]
async fn availability_check_uses_the_loaded_experience() {
    use chrono::NaiveDate;

    let api = Arc::new(FakeApi::with_items(vec![sample("exp-1", "Kayak")]));
    let mut detail = DetailController::new(api);
    detail.load("exp-1").await;

    let query = AvailabilityQuery {
        start_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 6, 5).unwrap(),
        participants: 2,
    };
    let check = detail.check_availability(&query).await.unwrap();
    assert!(check.available);

    let query = AvailabilityQuery {
        participants: 12,
        ..query
    };
    let check = detail.check_availability(&query).await.unwrap();
    assert!(!check.available);
}
