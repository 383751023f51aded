mod common;

use std::time::Duration;

use aiye_runtime::{
    ImageUpload, PanelAction, PaymentForm, PollerState, RuntimeError, Severity, UserIntent,
    ValidationError, VerificationForm,
};
use aiye_types::{OrganType, SymptomState};
use aiye_visuals::AnimationBehavior;
use common::{harness, organ, quiet_config, PanelEvent, ScriptedGateway};

fn payment_form(amount: f64) -> PaymentForm {
    PaymentForm {
        amount,
        currency: None,
        email: "ada@example.org".into(),
        name: "Ada".into(),
    }
}

fn verification_form() -> VerificationForm {
    VerificationForm {
        image: ImageUpload::new("image/png", b"\x89PNG".to_vec()),
        ngo_name: "Green Roots".into(),
        description: "Replanted 2ha".into(),
    }
}

#[tokio::test]
async fn load_single_inflamed_lungs() {
    let gateway = ScriptedGateway::with_organs(vec![organ(
        "o1",
        OrganType::Lungs,
        20.0,
        SymptomState::Inflamed,
    )]);
    let h = harness(gateway, quiet_config());

    let loaded = h.sync.load_organs().await.unwrap();

    assert_eq!(loaded.len(), 1);
    assert_eq!(h.sync.organs().len(), 1);
    let descriptor = h.renderer.descriptor_of(OrganType::Lungs).unwrap();
    assert_eq!(descriptor.inflammation(), 1.0);
    assert_eq!(descriptor.blend_weight(), Some(0.2));
    assert_eq!(descriptor.behavior(), AnimationBehavior::Breathing);
    assert_eq!(h.panel.events(), [PanelEvent::Organs(vec!["o1".into()])]);
}

#[tokio::test]
async fn load_replaces_cache_wholesale() {
    let gateway = ScriptedGateway::with_organs(vec![
        organ("a", OrganType::Lungs, 50.0, SymptomState::Healing),
        organ("b", OrganType::Veins, 50.0, SymptomState::Healing),
    ]);
    let h = harness(gateway.clone(), quiet_config());
    h.sync.load_organs().await.unwrap();
    assert!(h.sync.organ("a").is_some());

    gateway.set_organs(vec![organ("b", OrganType::Veins, 60.0, SymptomState::Healing)]);
    h.sync.load_organs().await.unwrap();

    assert!(h.sync.organ("a").is_none());
    assert_eq!(h.sync.organ("b").unwrap().health_score, 60.0);
}

#[tokio::test]
async fn panel_sees_deduplicated_organs() {
    let gateway = ScriptedGateway::with_organs(vec![
        organ("a", OrganType::Lungs, 40.0, SymptomState::Healing),
        organ("b", OrganType::Veins, 50.0, SymptomState::Healing),
        organ("a", OrganType::Lungs, 90.0, SymptomState::Healthy),
    ]);
    let h = harness(gateway, quiet_config());
    h.sync.load_organs().await.unwrap();

    assert_eq!(h.sync.organs().len(), 2);
    assert_eq!(h.sync.organ("a").unwrap().health_score, 90.0);
    assert_eq!(
        h.panel.events(),
        [PanelEvent::Organs(vec!["a".into(), "b".into()])]
    );
}

#[tokio::test]
async fn failed_load_keeps_previous_cache() {
    let gateway = ScriptedGateway::with_organs(vec![organ(
        "a",
        OrganType::Lungs,
        50.0,
        SymptomState::Healing,
    )]);
    let h = harness(gateway.clone(), quiet_config());
    h.sync.load_organs().await.unwrap();

    gateway.push_organs_failure("database offline");
    let err = h.sync.load_organs().await.unwrap_err();

    assert!(err.is_rejected());
    assert_eq!(h.sync.organs().len(), 1);
    let errors = h.panel.notifications(Severity::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("database offline"));
}

#[tokio::test]
async fn quota_snapshot_is_kept_and_published() {
    let h = harness(ScriptedGateway::with_organs(vec![]), quiet_config());
    assert!(h.sync.quota().is_none());

    let quota = h.sync.update_quota().await.unwrap();

    assert_eq!(quota.calls_remaining(), Some(5));
    assert_eq!(h.sync.quota(), Some(quota.clone()));
    assert_eq!(h.panel.events(), [PanelEvent::Quota(quota)]);
}

#[tokio::test]
async fn selection_is_exclusive_and_ignores_unknown_ids() {
    let gateway = ScriptedGateway::with_organs(vec![
        organ("a", OrganType::Lungs, 50.0, SymptomState::Healing),
        organ("b", OrganType::Veins, 50.0, SymptomState::Healing),
    ]);
    let h = harness(gateway, quiet_config());
    h.sync.load_organs().await.unwrap();

    assert!(h.sync.select_organ("a").is_some());
    assert!(h.sync.select_organ("b").is_some());
    assert!(h.sync.select_organ("ghost").is_none());

    assert_eq!(h.sync.selected_id().as_deref(), Some("b"));
    assert_eq!(h.panel.selections(), ["a", "b"]);
    assert_eq!(h.renderer.scale_of(OrganType::Lungs), Some(1.0));
    assert!((h.renderer.scale_of(OrganType::Veins).unwrap() - 1.1).abs() < 1e-6);
}

#[tokio::test]
async fn selection_survives_organ_disappearing() {
    let gateway = ScriptedGateway::with_organs(vec![organ(
        "a",
        OrganType::Skin,
        50.0,
        SymptomState::Healing,
    )]);
    let h = harness(gateway.clone(), quiet_config());
    h.sync.load_organs().await.unwrap();
    h.sync.select_organ("a");

    gateway.set_organs(vec![]);
    h.sync.load_organs().await.unwrap();

    assert_eq!(h.sync.selected_id().as_deref(), Some("a"));
    assert!(h.sync.selected().is_none());
}

#[tokio::test]
async fn healthy_skin_keeps_its_material() {
    let gateway = ScriptedGateway::with_organs(vec![organ(
        "s",
        OrganType::Skin,
        40.0,
        SymptomState::Healing,
    )]);
    let h = harness(gateway.clone(), quiet_config());
    h.sync.load_organs().await.unwrap();
    let damaged = h.renderer.descriptor_of(OrganType::Skin).unwrap();

    gateway.set_organs(vec![organ("s", OrganType::Skin, 85.0, SymptomState::Healthy)]);
    h.sync.load_organs().await.unwrap();
    assert_eq!(h.renderer.descriptor_of(OrganType::Skin).unwrap(), damaged);

    gateway.set_organs(vec![organ("s", OrganType::Skin, 79.0, SymptomState::Healthy)]);
    h.sync.load_organs().await.unwrap();
    assert_ne!(h.renderer.descriptor_of(OrganType::Skin).unwrap(), damaged);
}

#[tokio::test]
async fn diagnose_all_refreshes_even_when_it_fails() {
    let gateway = ScriptedGateway::with_organs(vec![organ(
        "a",
        OrganType::Lungs,
        50.0,
        SymptomState::Healing,
    )]);
    gateway.fail_diagnose_all("quota exceeded");
    let h = harness(gateway.clone(), quiet_config());

    assert!(h.sync.diagnose_all().await.is_err());

    assert_eq!(
        gateway.calls(),
        ["diagnose_all", "list_organs", "quota_status"]
    );
    assert_eq!(h.sync.organs().len(), 1);
    assert_eq!(
        h.panel.busy_changes(),
        [
            (PanelAction::DiagnoseAll, true),
            (PanelAction::DiagnoseAll, false)
        ]
    );
    assert!(h.panel.notifications(Severity::Error)[0].contains("quota exceeded"));
}

#[tokio::test]
async fn diagnose_all_success_notifies() {
    let h = harness(ScriptedGateway::with_organs(vec![]), quiet_config());

    h.sync.dispatch(UserIntent::DiagnoseAll).await.unwrap();

    assert_eq!(
        h.panel.notifications(Severity::Success),
        ["Diagnostic scan complete"]
    );
    assert!(h.panel.events().contains(&PanelEvent::Diagnosis(None)));
}

#[tokio::test]
async fn diagnose_unknown_organ_is_a_no_op() {
    let gateway = ScriptedGateway::with_organs(vec![]);
    let h = harness(gateway.clone(), quiet_config());

    let report = h.sync.diagnose_organ("ghost").await.unwrap();

    assert!(report.is_none());
    assert!(gateway.calls().is_empty());
    assert!(h.panel.events().is_empty());
}

#[tokio::test]
async fn diagnose_one_organ_then_refresh() {
    let gateway = ScriptedGateway::with_organs(vec![organ(
        "a",
        OrganType::Veins,
        50.0,
        SymptomState::Healing,
    )]);
    let h = harness(gateway.clone(), quiet_config());
    h.sync.load_organs().await.unwrap();

    h.sync.dispatch(UserIntent::Diagnose("a".into())).await.unwrap();

    assert_eq!(gateway.call_count("diagnose_organ"), 1);
    assert_eq!(gateway.call_count("list_organs"), 2);
    assert!(h
        .panel
        .events()
        .contains(&PanelEvent::Diagnosis(Some("a".into()))));
}

#[tokio::test]
async fn pay_requires_a_selection() {
    let gateway = ScriptedGateway::with_organs(vec![]);
    let h = harness(gateway.clone(), quiet_config());

    let err = h.sync.pay(&payment_form(100.0)).await.unwrap_err();

    assert!(matches!(err, RuntimeError::NoSelection));
    assert_eq!(gateway.call_count("initialize_payment"), 0);
    assert_eq!(h.panel.notifications(Severity::Error), ["Select an organ first"]);
}

#[tokio::test]
async fn pay_rejects_invalid_form_locally() {
    let gateway = ScriptedGateway::with_organs(vec![organ(
        "a",
        OrganType::Lungs,
        50.0,
        SymptomState::Healing,
    )]);
    let h = harness(gateway.clone(), quiet_config());
    h.sync.load_organs().await.unwrap();
    h.sync.select_organ("a");

    let err = h.sync.pay(&payment_form(0.0)).await.unwrap_err();

    assert!(matches!(
        err,
        RuntimeError::Validation(ValidationError::AmountOutOfRange { .. })
    ));
    assert_eq!(gateway.call_count("initialize_payment"), 0);
}

#[tokio::test(start_paused = true)]
async fn pay_opens_link_and_reloads_later() {
    let gateway = ScriptedGateway::with_organs(vec![organ(
        "a",
        OrganType::Lungs,
        50.0,
        SymptomState::Healing,
    )]);
    let h = harness(gateway.clone(), quiet_config());
    h.sync.load_organs().await.unwrap();
    h.sync.select_organ("a");

    let link = h.sync.pay(&payment_form(100.0)).await.unwrap();

    assert_eq!(link.payment_link, "https://pay.example/a");
    assert_eq!(gateway.payments()[0].currency, "USD");
    assert!(h.panel.events().contains(&PanelEvent::PaymentLink(
        "a".into(),
        "https://pay.example/a".into()
    )));
    assert_eq!(
        h.panel.busy_changes(),
        [(PanelAction::Pay, true), (PanelAction::Pay, false)]
    );

    tokio::time::sleep(Duration::from_secs(9)).await;
    assert_eq!(gateway.call_count("list_organs"), 1);
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(gateway.call_count("list_organs"), 2);
}

#[tokio::test]
async fn failed_payment_clears_busy_flag() {
    let gateway = ScriptedGateway::with_organs(vec![organ(
        "a",
        OrganType::Lungs,
        50.0,
        SymptomState::Healing,
    )]);
    gateway.fail_payment("processor down");
    let h = harness(gateway.clone(), quiet_config());
    h.sync.load_organs().await.unwrap();
    h.sync.select_organ("a");

    let result = h.sync.dispatch(UserIntent::Pay(payment_form(50.0))).await;

    assert!(matches!(result, Err(RuntimeError::Gateway(_))));
    assert_eq!(
        h.panel.busy_changes(),
        [(PanelAction::Pay, true), (PanelAction::Pay, false)]
    );
    assert!(h.panel.notifications(Severity::Error)[0].contains("processor down"));
}

#[tokio::test]
async fn verify_submits_and_reloads() {
    let gateway = ScriptedGateway::with_organs(vec![organ(
        "a",
        OrganType::Lungs,
        20.0,
        SymptomState::Inflamed,
    )]);
    let h = harness(gateway.clone(), quiet_config());
    h.sync.load_organs().await.unwrap();
    h.sync.select_organ("a");

    let outcome = h.sync.verify(&verification_form()).await.unwrap();

    assert!(outcome.verification.verified);
    let sent = &gateway.verifications()[0];
    assert_eq!(sent.organ_id, "a");
    assert_eq!(sent.image_base64, "data:image/png;base64,iVBORw==");
    assert_eq!(gateway.call_count("list_organs"), 2);
    assert!(h
        .panel
        .events()
        .contains(&PanelEvent::Verification("a".into(), true)));
    assert_eq!(
        h.panel.busy_changes(),
        [(PanelAction::Verify, true), (PanelAction::Verify, false)]
    );
    assert_eq!(h.panel.notifications(Severity::Success), ["Verification complete"]);
}

#[tokio::test]
async fn failed_verification_clears_busy_flag() {
    let gateway = ScriptedGateway::with_organs(vec![organ(
        "a",
        OrganType::Lungs,
        20.0,
        SymptomState::Inflamed,
    )]);
    gateway.fail_verification("blurry image");
    let h = harness(gateway.clone(), quiet_config());
    h.sync.load_organs().await.unwrap();
    h.sync.select_organ("a");

    assert!(h.sync.verify(&verification_form()).await.is_err());

    assert_eq!(
        h.panel.busy_changes(),
        [(PanelAction::Verify, true), (PanelAction::Verify, false)]
    );
    assert_eq!(gateway.call_count("list_organs"), 1);
}

#[tokio::test]
async fn verify_rejects_unsupported_image() {
    let gateway = ScriptedGateway::with_organs(vec![organ(
        "a",
        OrganType::Lungs,
        20.0,
        SymptomState::Inflamed,
    )]);
    let h = harness(gateway.clone(), quiet_config());
    h.sync.load_organs().await.unwrap();
    h.sync.select_organ("a");

    let mut form = verification_form();
    form.image = ImageUpload::new("image/gif", vec![1, 2, 3]);
    let err = h.sync.verify(&form).await.unwrap_err();

    assert!(matches!(
        err,
        RuntimeError::Validation(ValidationError::UnsupportedImageFormat(_))
    ));
    assert!(h.panel.busy_changes().is_empty());
    assert_eq!(gateway.call_count("verify_restoration"), 0);
}

#[tokio::test]
async fn show_vials_hands_history_to_panel() {
    let h = harness(ScriptedGateway::with_organs(vec![]), quiet_config());

    h.sync
        .dispatch(UserIntent::ShowVials("a".into()))
        .await
        .unwrap();

    assert_eq!(h.panel.events(), [PanelEvent::Vials("a".into(), 1)]);
}

#[tokio::test]
async fn advance_reaches_only_cached_organ_types() {
    let gateway = ScriptedGateway::with_organs(vec![organ(
        "v",
        OrganType::Veins,
        50.0,
        SymptomState::Healing,
    )]);
    let h = harness(gateway, quiet_config());
    h.sync.load_organs().await.unwrap();

    h.sync.advance(4.0);

    assert_eq!(
        h.renderer.descriptor_of(OrganType::Veins).unwrap().time(),
        Some(4.0)
    );
    // lungs were never mapped and keep the default material
    assert_eq!(h.renderer.descriptor_of(OrganType::Lungs).unwrap().time(), None);
}

#[tokio::test(start_paused = true)]
async fn init_loads_and_starts_polling() {
    let gateway = ScriptedGateway::with_organs(vec![organ(
        "a",
        OrganType::Lungs,
        50.0,
        SymptomState::Healing,
    )]);
    let h = harness(gateway.clone(), aiye_runtime::AiyeConfig::default());

    h.sync.init().await;

    assert_eq!(
        gateway.calls(),
        ["health_check", "list_organs", "quota_status"]
    );
    assert_eq!(
        h.sync.polling_state(),
        PollerState::Running {
            interval: Duration::from_secs(300)
        }
    );
    h.sync.stop_polling();
}

#[tokio::test]
async fn init_survives_unreachable_gateway() {
    let gateway = ScriptedGateway::with_organs(vec![]);
    gateway.fail_health("connection refused");
    let h = harness(gateway.clone(), quiet_config());

    h.sync.init().await;

    assert_eq!(gateway.call_count("list_organs"), 1);
    assert_eq!(h.sync.polling_state(), PollerState::Stopped);
    assert!(h.panel.notifications(Severity::Error)[0].contains("connection refused"));
}
