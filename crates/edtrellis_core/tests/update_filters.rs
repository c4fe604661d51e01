use std::sync::Once;

use edtrellis_core::{
    parse_query_string, update, AppState, CategoricalField, Effect, FetchStatus, FilterField,
    FilterState, Msg, QueryParams, TextField,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(edtrellis_logging::initialize_for_tests);
}

fn params(pairs: &[(&str, &str)]) -> QueryParams {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn type_and_submit(state: AppState, field: TextField, text: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(
        state,
        Msg::DraftEdited {
            field,
            value: text.to_string(),
        },
    );
    update(state, Msg::DraftSubmitted)
}

fn pushed_params(effects: &[Effect]) -> Option<&QueryParams> {
    effects.iter().find_map(|effect| match effect {
        Effect::PushQuery { params } => Some(params),
        _ => None,
    })
}

fn fetched_params(effects: &[Effect]) -> Option<&QueryParams> {
    effects.iter().find_map(|effect| match effect {
        Effect::FetchJobs { params, .. } => Some(params),
        _ => None,
    })
}

#[test]
fn location_initializes_filters_and_fetches_once() {
    init_logging();
    let query = parse_query_string("?search=developer&location=Remote");
    let (state, effects) = update(AppState::new(), Msg::LocationChanged(query));

    assert_eq!(
        state.committed(),
        &FilterState {
            search: "developer".into(),
            location: "Remote".into(),
            category: String::new(),
            job_type: String::new(),
        }
    );
    assert_eq!(state.draft().search, "developer");
    assert_eq!(state.draft().location, "Remote");
    assert_eq!(state.status(), FetchStatus::Loading);
    assert_eq!(
        effects,
        vec![Effect::FetchJobs {
            request_id: 1,
            params: params(&[("location", "Remote"), ("search", "developer")]),
        }]
    );
}

#[test]
fn location_parse_is_idempotent() {
    let query = parse_query_string("category=Technology&utm_source=mail&type=Remote");
    let first = FilterState::from_query_params(&query);
    let second = FilterState::from_query_params(&query);
    assert_eq!(first, second);
    assert_eq!(first.category, "Technology");
    assert_eq!(first.job_type, "Remote");
}

#[test]
fn commit_round_trips_through_pushed_url() {
    init_logging();
    let target = FilterState {
        search: "data & ml engineer".into(),
        location: "São Paulo".into(),
        category: "Technology".into(),
        job_type: "Full-time".into(),
    };
    let (state, effects) = update(AppState::new(), Msg::Commit(target.clone()));

    assert!(matches!(effects[0], Effect::PushQuery { .. }));
    assert!(matches!(effects[1], Effect::FetchJobs { .. }));
    let pushed = pushed_params(&effects).unwrap();
    assert_eq!(FilterState::from_query_params(pushed), target);
    assert_eq!(
        FilterState::from_query_string(&state.view().query_string),
        target
    );
}

#[test]
fn empty_fields_are_never_serialized() {
    init_logging();
    let (_, effects) = update(
        AppState::new(),
        Msg::Commit(FilterState::new().with(FilterField::Location, "Berlin")),
    );

    let expected = params(&[("location", "Berlin")]);
    assert_eq!(pushed_params(&effects), Some(&expected));
    assert_eq!(fetched_params(&effects), Some(&expected));
    assert!(pushed_params(&effects)
        .unwrap()
        .values()
        .all(|value| !value.is_empty()));
}

#[test]
fn commit_trims_text_fields() {
    init_logging();
    let padded = FilterState::new().with(FilterField::Search, "  react  ");
    let plain = FilterState::new().with(FilterField::Search, "react");

    let (padded_state, padded_effects) = update(AppState::new(), Msg::Commit(padded));
    let (plain_state, plain_effects) = update(AppState::new(), Msg::Commit(plain));

    assert_eq!(padded_state.committed(), plain_state.committed());
    assert_eq!(padded_effects, plain_effects);
}

#[test]
fn whitespace_only_search_commits_as_empty() {
    init_logging();
    let (state, effects) = type_and_submit(AppState::new(), TextField::Search, "  ");

    assert_eq!(state.committed().search, "");
    assert_eq!(state.draft().search, "");
    assert_eq!(pushed_params(&effects), Some(&QueryParams::new()));
    assert!(!fetched_params(&effects).unwrap().contains_key("search"));
}

#[test]
fn draft_edits_are_isolated_until_submit() {
    init_logging();
    let (mut state, _) = update(AppState::new(), Msg::LocationChanged(QueryParams::new()));
    assert!(state.consume_dirty());
    let committed_before = state.committed().clone();
    let request_before = state.latest_request_id();

    let (state, effects) = update(
        state,
        Msg::DraftEdited {
            field: TextField::Search,
            value: "abc".into(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.committed(), &committed_before);
    assert_eq!(state.latest_request_id(), request_before);
    assert_eq!(state.draft().search, "abc");
    assert_eq!(state.view().query_string, "");

    let (state, effects) = update(state, Msg::DraftSubmitted);
    assert_eq!(state.committed().search, "abc");
    assert_eq!(pushed_params(&effects), Some(&params(&[("search", "abc")])));
}

#[test]
fn submit_keeps_categorical_filters() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::LocationChanged(parse_query_string("category=Finance&type=Contract")),
    );
    let (state, _) = update(
        state,
        Msg::DraftEdited {
            field: TextField::Location,
            value: " Austin ".into(),
        },
    );
    let (state, effects) = update(state, Msg::DraftSubmitted);

    assert_eq!(state.committed().location, "Austin");
    assert_eq!(state.committed().category, "Finance");
    assert_eq!(state.committed().job_type, "Contract");
    assert_eq!(
        pushed_params(&effects),
        Some(&params(&[
            ("category", "Finance"),
            ("location", "Austin"),
            ("type", "Contract")
        ]))
    );
}

#[test]
fn categorical_select_commits_immediately() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::CategoricalSelected {
            field: CategoricalField::JobType,
            value: "Remote".into(),
        },
    );

    assert_eq!(state.committed().job_type, "Remote");
    assert_eq!(pushed_params(&effects), Some(&params(&[("type", "Remote")])));
    assert_eq!(fetched_params(&effects), Some(&params(&[("type", "Remote")])));
    assert_eq!(state.status(), FetchStatus::Loading);
}

#[test]
fn categorical_select_merges_with_existing_type() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::LocationChanged(parse_query_string("type=Remote")),
    );
    let (state, effects) = update(
        state,
        Msg::CategoricalSelected {
            field: CategoricalField::Category,
            value: "Technology".into(),
        },
    );

    assert_eq!(state.committed().category, "Technology");
    assert_eq!(state.committed().job_type, "Remote");
    assert_eq!(state.view().query_string, "category=Technology&type=Remote");
    assert_eq!(
        pushed_params(&effects),
        Some(&params(&[("category", "Technology"), ("type", "Remote")]))
    );
}

#[test]
fn categorical_select_leaves_unsubmitted_draft_alone() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::DraftEdited {
            field: TextField::Search,
            value: "nur".into(),
        },
    );
    let (state, _) = update(
        state,
        Msg::CategoricalSelected {
            field: CategoricalField::Category,
            value: "Healthcare".into(),
        },
    );

    assert_eq!(state.draft().search, "nur");
    assert_eq!(state.committed().search, "");
}

#[test]
fn clearing_one_filter_keeps_the_others() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::LocationChanged(parse_query_string("search=rust&location=Remote&type=Contract")),
    );
    let (state, effects) = update(state, Msg::FilterCleared(FilterField::Search));

    assert_eq!(state.committed().search, "");
    assert_eq!(state.draft().search, "");
    assert_eq!(state.draft().location, "Remote");
    assert_eq!(
        pushed_params(&effects),
        Some(&params(&[("location", "Remote"), ("type", "Contract")]))
    );
    let chips: Vec<_> = state
        .view()
        .active_chips
        .iter()
        .map(|chip| chip.field)
        .collect();
    assert_eq!(chips, vec![FilterField::Location, FilterField::JobType]);
}

#[test]
fn clear_all_resets_committed_draft_and_url() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::LocationChanged(parse_query_string(
            "search=teacher&location=Leeds&category=Education&type=Part-time",
        )),
    );
    let (state, _) = update(
        state,
        Msg::DraftEdited {
            field: TextField::Search,
            value: "unsent".into(),
        },
    );
    let (state, effects) = update(state, Msg::AllCleared);

    assert_eq!(state.committed(), &FilterState::default());
    assert_eq!(state.draft().search, "");
    assert_eq!(state.draft().location, "");
    assert_eq!(pushed_params(&effects), Some(&QueryParams::new()));
    assert_eq!(fetched_params(&effects), Some(&QueryParams::new()));
    let view = state.view();
    assert_eq!(view.query_string, "");
    assert!(!view.has_active_filters);
    assert!(view.active_chips.is_empty());
}

#[test]
fn chips_follow_field_order_with_labels() {
    init_logging();
    let (state, _) = update(
        AppState::new(),
        Msg::LocationChanged(parse_query_string("type=Internship&search=design")),
    );
    let view = state.view();

    let chips: Vec<_> = view
        .active_chips
        .iter()
        .map(|chip| (chip.label, chip.value.as_str()))
        .collect();
    assert_eq!(chips, vec![("Search", "design"), ("Job type", "Internship")]);
}
