//! Presentation controller and script analyzer scenarios.

mod test_utils;

use std::io::Write;
use std::sync::Arc;
use storyboard_core::{Scene, Storyboard};
use storyboard_error::{AnalysisErrorKind, CredentialErrorKind, StoryboardErrorKind};
use storyboard_studio::{ANALYSIS_FAILED_MESSAGE, Mode, View};
use test_utils::{MockGateway, MockHost, MockSelection, controller};

#[tokio::test]
async fn starts_checking_credential() {
    let studio = controller(
        Arc::new(MockGateway::new()),
        Some(Arc::new(MockHost::new(true, MockSelection::Succeeds))),
    );

    assert_eq!(studio.mode(), Mode::CheckingCredential);
}

#[tokio::test]
async fn present_credential_goes_straight_to_script_input() {
    let studio = controller(
        Arc::new(MockGateway::new()),
        Some(Arc::new(MockHost::new(true, MockSelection::Succeeds))),
    );

    assert_eq!(studio.check_credential().await, Mode::Ready(View::ScriptInput));
}

#[tokio::test]
async fn selection_is_trusted_without_rechecking() -> anyhow::Result<()> {
    let host = Arc::new(MockHost::new(false, MockSelection::Succeeds));
    let studio = controller(Arc::new(MockGateway::new()), Some(Arc::clone(&host)));

    assert_eq!(studio.check_credential().await, Mode::NeedCredential);
    studio.select_credential().await?;

    assert_eq!(studio.mode(), Mode::Ready(View::ScriptInput));
    assert_eq!(host.check_calls(), 1);
    assert_eq!(host.select_calls(), 1);
    Ok(())
}

#[tokio::test]
async fn failed_selection_stays_blocked() {
    let studio = controller(
        Arc::new(MockGateway::new()),
        Some(Arc::new(MockHost::new(false, MockSelection::Fails))),
    );
    studio.check_credential().await;

    let err = studio.select_credential().await.unwrap_err();

    assert!(matches!(err.kind(), StoryboardErrorKind::Credential(_)));
    assert_eq!(studio.mode(), Mode::NeedCredential);
}

#[tokio::test]
async fn missing_host_means_no_credential() {
    let studio = controller(Arc::new(MockGateway::new()), None);

    assert_eq!(studio.check_credential().await, Mode::NeedCredential);

    let err = studio.select_credential().await.unwrap_err();
    assert!(matches!(
        err.kind(),
        StoryboardErrorKind::Credential(e) if matches!(e.kind, CredentialErrorKind::HostUnavailable(_))
    ));
    assert_eq!(studio.mode(), Mode::NeedCredential);
}

#[tokio::test]
async fn failing_check_means_no_credential() {
    let studio = controller(
        Arc::new(MockGateway::new()),
        Some(Arc::new(MockHost::broken_check())),
    );

    assert_eq!(studio.check_credential().await, Mode::NeedCredential);
}

#[tokio::test]
async fn analysis_requires_ready() {
    let gateway = Arc::new(MockGateway::new());
    let studio = controller(
        Arc::clone(&gateway),
        Some(Arc::new(MockHost::new(false, MockSelection::Succeeds))),
    );
    studio.check_credential().await;
    studio.analyzer().set_script("INT. ROOM - DAY");

    let err = studio.analyze().await.unwrap_err();

    assert!(matches!(
        err.kind(),
        StoryboardErrorKind::Credential(e) if e.kind == CredentialErrorKind::Missing
    ));
    assert_eq!(gateway.analysis_calls(), 0);
}

#[tokio::test]
async fn three_scene_script_shows_three_empty_panels() -> anyhow::Result<()> {
    let gateway = Arc::new(MockGateway::new());
    let studio = controller(
        Arc::clone(&gateway),
        Some(Arc::new(MockHost::new(true, MockSelection::Succeeds))),
    );
    studio.check_credential().await;
    studio
        .analyzer()
        .set_script("INT. DINER - NIGHT\nJohn waits.\nMary arrives.\nThey leave together.");

    let generator = studio.analyze().await?.expect("storyboard produced");

    assert_eq!(studio.mode(), Mode::Ready(View::StoryboardView));
    let board = generator.snapshot();
    assert_eq!(board.len(), 3);
    let numbers: Vec<u32> = board.iter().map(|scene| scene.sequence_number()).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert!(board.iter().all(|scene| !scene.has_image() && !scene.generation_in_flight()));
    assert!(studio.storyboard().is_some());
    Ok(())
}

#[tokio::test]
async fn failed_analysis_keeps_script_and_shows_inline_error() -> anyhow::Result<()> {
    let gateway = Arc::new(MockGateway::new());
    gateway.push_analysis(Err(AnalysisErrorKind::EmptyPayload));
    let studio = controller(
        Arc::clone(&gateway),
        Some(Arc::new(MockHost::new(true, MockSelection::Succeeds))),
    );
    studio.check_credential().await;
    studio.analyzer().set_script("FADE IN.");

    assert!(studio.analyze().await?.is_none());

    let state = studio.analyzer().state();
    assert_eq!(state.script(), "FADE IN.");
    assert_eq!(state.error().as_deref(), Some(ANALYSIS_FAILED_MESSAGE));
    assert!(!state.is_analyzing());
    assert_eq!(studio.mode(), Mode::Ready(View::ScriptInput));

    let retried = studio.analyze().await?;
    assert!(retried.is_some());
    assert_eq!(studio.analyzer().error(), None);
    Ok(())
}

#[tokio::test]
async fn blank_script_is_not_sent() -> anyhow::Result<()> {
    let gateway = Arc::new(MockGateway::new());
    let studio = controller(
        Arc::clone(&gateway),
        Some(Arc::new(MockHost::new(true, MockSelection::Succeeds))),
    );
    studio.check_credential().await;
    studio.analyzer().set_script("  \n\t");

    assert!(studio.analyze().await?.is_none());
    assert_eq!(gateway.analysis_calls(), 0);
    assert_eq!(studio.analyzer().error(), None);
    Ok(())
}

#[tokio::test]
async fn back_to_script_discards_the_storyboard() -> anyhow::Result<()> {
    let studio = controller(
        Arc::new(MockGateway::new()),
        Some(Arc::new(MockHost::new(true, MockSelection::Succeeds))),
    );
    studio.check_credential().await;
    studio.analyzer().set_script("EXT. PIER - DUSK");
    let generator = studio.analyze().await?.expect("storyboard produced");
    generator.generate_one(0).await;

    studio.back_to_script();

    assert_eq!(studio.mode(), Mode::Ready(View::ScriptInput));
    assert!(studio.storyboard().is_none());
    assert_eq!(studio.analyzer().script(), "EXT. PIER - DUSK");
    Ok(())
}

#[tokio::test]
async fn reanalysis_replaces_the_storyboard() -> anyhow::Result<()> {
    let gateway = Arc::new(MockGateway::new());
    gateway.push_analysis(Ok(test_utils::three_scene_storyboard()));
    gateway.push_analysis(Ok(Storyboard::new(vec![Scene::new(
        1,
        "Single beat.",
        "A lighthouse at night.",
    )])));
    let studio = controller(
        Arc::clone(&gateway),
        Some(Arc::new(MockHost::new(true, MockSelection::Succeeds))),
    );
    studio.check_credential().await;
    studio.analyzer().set_script("Take one.");
    let first = studio.analyze().await?.expect("storyboard produced");

    studio.back_to_script();
    studio.analyzer().set_script("Take two.");
    let second = studio.analyze().await?.expect("storyboard produced");

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(second.snapshot().len(), 1);
    assert!(Arc::ptr_eq(&second, &studio.storyboard().expect("shown")));
    assert_eq!(studio.mode(), Mode::Ready(View::StoryboardView));
    Ok(())
}

#[tokio::test]
async fn analysis_with_no_scenes_stays_on_script_input() -> anyhow::Result<()> {
    let gateway = Arc::new(MockGateway::new());
    gateway.push_analysis(Ok(test_utils::three_scene_storyboard()));
    gateway.push_analysis(Ok(Storyboard::default()));
    let studio = controller(
        Arc::clone(&gateway),
        Some(Arc::new(MockHost::new(true, MockSelection::Succeeds))),
    );
    studio.check_credential().await;
    studio.analyzer().set_script("Take one.");
    let first = studio.analyze().await?.expect("storyboard produced");
    assert_eq!(first.snapshot().len(), 3);
    assert_eq!(studio.mode(), Mode::Ready(View::StoryboardView));

    studio.analyzer().set_script("Take two.");
    let second = studio.analyze().await?;

    assert!(second.is_none());
    assert!(studio.storyboard().is_none());
    assert_eq!(studio.mode(), Mode::Ready(View::ScriptInput));
    assert_eq!(gateway.analysis_calls(), 2);
    Ok(())
}

#[tokio::test]
async fn script_can_be_loaded_from_a_text_file() -> anyhow::Result<()> {
    let studio = controller(
        Arc::new(MockGateway::new()),
        Some(Arc::new(MockHost::new(true, MockSelection::Succeeds))),
    );
    let mut file = tempfile::NamedTempFile::new()?;
    write!(file, "INT. COFFEE SHOP - DAY\n\nA gloomy Monday morning.")?;

    studio.analyzer().load_script_file(file.path()).await?;

    assert_eq!(
        studio.analyzer().script(),
        "INT. COFFEE SHOP - DAY\n\nA gloomy Monday morning."
    );
    Ok(())
}

#[tokio::test]
async fn unreadable_script_file_keeps_current_text() {
    let studio = controller(
        Arc::new(MockGateway::new()),
        Some(Arc::new(MockHost::new(true, MockSelection::Succeeds))),
    );
    studio.analyzer().set_script("Keep me.");

    let err = studio
        .analyzer()
        .load_script_file("/nonexistent/script.txt")
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), StoryboardErrorKind::Io(_)));
    assert_eq!(studio.analyzer().script(), "Keep me.");
}

#[tokio::test]
async fn chat_is_available_alongside_the_storyboard() -> anyhow::Result<()> {
    let gateway = Arc::new(MockGateway::new());
    let studio = controller(
        Arc::clone(&gateway),
        Some(Arc::new(MockHost::new(true, MockSelection::Succeeds))),
    );
    studio.check_credential().await;

    let reply = studio.chat().send_turn_to_end("Any tips?").await?;

    assert_eq!(studio.chat().message(reply).expect("reply in log").text(), "ok");
    Ok(())
}
