mod common;

use common::{Call, MockGateway, controller, navigate_to_depth, server_error};
use edutrail::navigation::{Level, Transition, breadcrumbs};
use edutrail_core::{ApiError, NavError, PreconditionError};
use edutrail_models::{ChapterId, ClassId, Section, SubjectId, TopicId};

#[tokio::test]
async fn test_select_class_enters_subjects() {
    let gateway = MockGateway::seeded().into_arc();
    let controller = controller(&gateway);
    controller.show_classes(None).await.unwrap();

    let class = common::class(1, "Form 1", Section::Anglophone);
    let transition = controller.select_class(class).await.unwrap();

    assert_eq!(transition, Transition::Entered(Level::Subjects));
    let store = controller.store().read();
    assert_eq!(store.current_level(), Level::Subjects);
    assert_eq!(store.current_class().unwrap().id, ClassId::new(1));
    assert_eq!(store.subjects().len(), 2);
    assert_eq!(gateway.count(Call::ListSubjects(ClassId::new(1))), 1);
    assert!(!store.is_loading());
}

#[tokio::test]
async fn test_select_class_loads_class_resources() {
    let gateway = MockGateway::seeded().into_arc();
    let controller = controller(&gateway);
    navigate_to_depth(&controller, 1).await;

    let store = controller.store().read();
    assert_eq!(store.class_resources().len(), 1);
    assert_eq!(store.video_resources().len(), 1);
    assert_eq!(gateway.count(Call::ClassResources(ClassId::new(1))), 1);
    assert_eq!(gateway.count(Call::ClassVideos(ClassId::new(1))), 1);
}

#[tokio::test]
async fn test_class_resources_failure_does_not_block_transition() {
    let gateway = MockGateway::seeded().into_arc();
    gateway.fail(Call::ClassVideos(ClassId::new(1)), server_error());
    let controller = controller(&gateway);
    navigate_to_depth(&controller, 1).await;

    let store = controller.store().read();
    assert_eq!(store.current_level(), Level::Subjects);
    assert!(store.video_resources().is_empty());
    assert_eq!(store.class_resources().len(), 1);
    assert!(store.last_error().is_none());
}

#[tokio::test]
async fn test_show_classes_filters_by_section() {
    let gateway = MockGateway::seeded().into_arc();
    let controller = controller(&gateway);

    controller
        .show_classes(Some(Section::Francophone))
        .await
        .unwrap();

    let store = controller.store().read();
    assert_eq!(store.active_tab(), Some(Section::Francophone));
    assert_eq!(store.classes().len(), 1);
    assert_eq!(store.classes()[0].id, ClassId::new(2));
}

#[tokio::test]
async fn test_drill_down_to_resources() {
    let gateway = MockGateway::seeded().into_arc();
    let controller = controller(&gateway);
    navigate_to_depth(&controller, 4).await;

    let store = controller.store().read();
    assert_eq!(store.current_level(), Level::Resources);
    assert_eq!(store.current_topic().unwrap().id, TopicId::new(10));
    assert_eq!(store.resources().len(), 2);
    assert!(store.prefix_invariant_holds());
    assert_eq!(
        gateway.count(Call::ListResources(
            ClassId::new(1),
            SubjectId::new(5),
            ChapterId::new(20),
            TopicId::new(10)
        )),
        1
    );
}

#[tokio::test]
async fn test_chapters_sorted_by_order() {
    let gateway = MockGateway::seeded().into_arc();
    let controller = controller(&gateway);
    navigate_to_depth(&controller, 2).await;

    let ids: Vec<i64> = controller
        .store()
        .read()
        .chapters()
        .iter()
        .map(|c| c.id.get())
        .collect();
    assert_eq!(ids, vec![21, 20]);
}

#[tokio::test]
async fn test_fetch_failure_leaves_state_unchanged() {
    let gateway = MockGateway::seeded().into_arc();
    let controller = controller(&gateway);
    navigate_to_depth(&controller, 1).await;
    gateway.fail(
        Call::ListChapters(ClassId::new(1), SubjectId::new(5)),
        ApiError::Transport("connection reset".into()),
    );

    let before = controller.store().read().persisted().clone();
    let err = controller
        .select_subject(common::subject(5, "Biology"))
        .await
        .unwrap_err();

    assert!(matches!(err, NavError::Gateway(ApiError::Transport(_))));
    assert!(err.is_retryable());
    let store = controller.store().read();
    assert_eq!(store.persisted(), &before);
    assert_eq!(store.current_level(), Level::Subjects);
    assert!(store.current_subject().is_none());
    assert!(!store.is_loading());
    assert!(store.last_error().is_some());
}

#[tokio::test]
async fn test_retry_after_failure_succeeds() {
    let gateway = MockGateway::seeded().into_arc();
    let controller = controller(&gateway);
    navigate_to_depth(&controller, 1).await;
    let call = Call::ListChapters(ClassId::new(1), SubjectId::new(5));
    gateway.fail(call, server_error());

    assert!(
        controller
            .select_subject(common::subject(5, "Biology"))
            .await
            .is_err()
    );
    gateway.succeed(call);
    controller
        .select_subject(common::subject(5, "Biology"))
        .await
        .unwrap();

    let store = controller.store().read();
    assert_eq!(store.current_level(), Level::Chapters);
    assert!(store.last_error().is_none());
    assert_eq!(gateway.count(call), 2);
}

#[tokio::test]
async fn test_select_requires_matching_level() {
    let gateway = MockGateway::seeded().into_arc();
    let controller = controller(&gateway);

    let err = controller
        .select_subject(common::subject(5, "Biology"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        NavError::Precondition(PreconditionError::WrongLevel {
            requested: "subjects",
            current: "classes"
        })
    ));
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_select_without_parent_selection() {
    let gateway = MockGateway::seeded().into_arc();
    let controller = controller(&gateway);
    // Level set without the class selection it needs.
    controller
        .store()
        .write()
        .set_current_level(Level::Subjects);

    let err = controller
        .select_subject(common::subject(5, "Biology"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        NavError::Precondition(PreconditionError::MissingSelection("class"))
    ));
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_navigate_back_clears_one_level() {
    let gateway = MockGateway::seeded().into_arc();
    let controller = controller(&gateway);
    navigate_to_depth(&controller, 4).await;

    assert_eq!(controller.navigate_back(), Some(Level::Topics));

    let store = controller.store().read();
    assert_eq!(store.current_level(), Level::Topics);
    assert!(store.current_topic().is_none());
    assert_eq!(store.current_chapter().unwrap().id, ChapterId::new(20));
    assert_eq!(store.current_subject().unwrap().id, SubjectId::new(5));
    assert_eq!(store.current_class().unwrap().id, ClassId::new(1));
    // Listings stay in memory for re-entry.
    assert_eq!(store.resources().len(), 2);
}

#[tokio::test]
async fn test_navigate_back_at_root() {
    let gateway = MockGateway::seeded().into_arc();
    let controller = controller(&gateway);

    assert_eq!(controller.navigate_back(), None);
    assert_eq!(controller.store().read().current_level(), Level::Classes);
}

#[tokio::test]
async fn test_prefix_invariant_along_every_path() {
    let gateway = MockGateway::seeded().into_arc();
    let controller = controller(&gateway);
    navigate_to_depth(&controller, 4).await;

    while controller.navigate_back().is_some() {
        assert!(controller.store().read().prefix_invariant_holds());
    }
    assert_eq!(controller.store().read().current_level(), Level::Classes);
    assert!(controller.store().read().current_class().is_none());
}

#[tokio::test]
async fn test_jump_to_deeper_level_rejected() {
    let gateway = MockGateway::seeded().into_arc();
    let controller = controller(&gateway);
    navigate_to_depth(&controller, 1).await;

    let err = controller.jump_to(Level::Topics).unwrap_err();
    assert!(matches!(err, NavError::Precondition(_)));
    assert_eq!(controller.store().read().current_level(), Level::Subjects);
}

#[tokio::test]
async fn test_breadcrumb_click_clears_deeper_selections() {
    let gateway = MockGateway::seeded().into_arc();

    for k in 0..4 {
        let controller = controller(&gateway);
        navigate_to_depth(&controller, 4).await;

        let crumbs = breadcrumbs(controller.store().read().persisted());
        assert_eq!(crumbs.len(), 4);

        controller.jump_to(crumbs[k].target).unwrap();

        let store = controller.store().read();
        assert_eq!(store.current_level().depth(), k);
        assert!(store.prefix_invariant_holds());
        let state = store.persisted();
        assert_eq!(state.current_class.is_some(), k >= 1);
        assert_eq!(state.current_subject.is_some(), k >= 2);
        assert_eq!(state.current_chapter.is_some(), k >= 3);
        assert!(state.current_topic.is_none());
    }
}

#[tokio::test]
async fn test_late_response_is_discarded() {
    let gateway = MockGateway::seeded().into_arc();
    let controller = controller(&gateway);
    navigate_to_depth(&controller, 1).await;

    let slow = Call::ListChapters(ClassId::new(1), SubjectId::new(5));
    let gate = gateway.gate(slow);

    let (first, second) = tokio::join!(
        controller.select_subject(common::subject(5, "Biology")),
        async {
            let result = controller
                .select_subject(common::subject(6, "History"))
                .await;
            gate.notify_one();
            result
        }
    );

    assert_eq!(first.unwrap(), Transition::Superseded);
    assert_eq!(second.unwrap(), Transition::Entered(Level::Chapters));
    let store = controller.store().read();
    assert_eq!(store.current_subject().unwrap().id, SubjectId::new(6));
    assert_eq!(store.chapters().len(), 1);
    assert_eq!(store.chapters()[0].id, ChapterId::new(30));
}

#[tokio::test]
async fn test_back_during_fetch_discards_response() {
    let gateway = MockGateway::seeded().into_arc();
    let controller = controller(&gateway);
    navigate_to_depth(&controller, 1).await;

    let gate = gateway.gate(Call::ListChapters(ClassId::new(1), SubjectId::new(5)));

    let (transition, back) = tokio::join!(
        controller.select_subject(common::subject(5, "Biology")),
        async {
            let back = controller.navigate_back();
            gate.notify_one();
            back
        }
    );

    assert_eq!(back, Some(Level::Classes));
    assert_eq!(transition.unwrap(), Transition::Superseded);
    let store = controller.store().read();
    assert_eq!(store.current_level(), Level::Classes);
    assert!(store.current_class().is_none());
    assert!(store.current_subject().is_none());
}

#[tokio::test]
async fn test_loading_flag_while_fetching() {
    let gateway = MockGateway::seeded().into_arc();
    let controller = controller(&gateway);
    navigate_to_depth(&controller, 1).await;

    let gate = gateway.gate(Call::ListChapters(ClassId::new(1), SubjectId::new(5)));

    let (_, loading) = tokio::join!(
        controller.select_subject(common::subject(5, "Biology")),
        async {
            let loading = controller.store().read().is_loading();
            gate.notify_one();
            loading
        }
    );

    assert!(loading);
    assert!(!controller.store().read().is_loading());
}
