//! In-memory collaborators for synchronizer tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use aiye_gateway::{Gateway, GatewayError, GatewayResult};
use aiye_runtime::{AiyeConfig, Notification, Panel, PanelAction, Severity, Synchronizer};
use aiye_scene::{OrganModels, SceneRenderer};
use aiye_types::{
    HealthStatus, OrganRecord, OrganType, PaymentLink, PaymentRequest, QuotaStatus, SymptomState,
    Verdict, VerificationOutcome, VerificationRequest, VialRecord,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Map, Value};

pub fn organ(id: &str, organ_type: OrganType, score: f64, state: SymptomState) -> OrganRecord {
    OrganRecord {
        id: id.to_string(),
        name: format!("{organ_type} {id}"),
        organ_type,
        health_score: score,
        symptom_state: state,
        current_funding_usd: 250.0,
        target_funding_usd: 1000.0,
        funding_percentage: 25.0,
    }
}

fn rejected(endpoint: &str, message: &str) -> GatewayError {
    GatewayError::Rejected {
        endpoint: endpoint.to_string(),
        message: message.to_string(),
    }
}

struct OrganScript {
    delay: Duration,
    outcome: Result<Vec<OrganRecord>, String>,
}

/// A gateway whose organ responses are scripted call by call.
///
/// Scripted `list_organs` responses are consumed in call order, each after
/// its own delay. Once the script runs out the steady organ set is served
/// immediately.
#[derive(Default)]
pub struct ScriptedGateway {
    script: Mutex<VecDeque<OrganScript>>,
    steady: Mutex<Vec<OrganRecord>>,
    quota: Mutex<QuotaStatus>,
    diagnose_failure: Mutex<Option<String>>,
    payment_failure: Mutex<Option<String>>,
    verify_failure: Mutex<Option<String>>,
    health_failure: Mutex<Option<String>>,
    calls: Mutex<Vec<String>>,
    payments: Mutex<Vec<PaymentRequest>>,
    verifications: Mutex<Vec<VerificationRequest>>,
}

impl ScriptedGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_organs(organs: Vec<OrganRecord>) -> Arc<Self> {
        let gateway = Self::default();
        *gateway.steady.lock() = organs;
        *gateway.quota.lock() = QuotaStatus(json!({ "callsRemaining": 5 }));
        Arc::new(gateway)
    }

    pub fn set_organs(&self, organs: Vec<OrganRecord>) {
        *self.steady.lock() = organs;
    }

    pub fn push_organs(&self, delay: Duration, organs: Vec<OrganRecord>) {
        self.script.lock().push_back(OrganScript {
            delay,
            outcome: Ok(organs),
        });
    }

    pub fn push_organs_failure(&self, message: &str) {
        self.script.lock().push_back(OrganScript {
            delay: Duration::ZERO,
            outcome: Err(message.to_string()),
        });
    }

    pub fn fail_diagnose_all(&self, message: &str) {
        *self.diagnose_failure.lock() = Some(message.to_string());
    }

    pub fn fail_payment(&self, message: &str) {
        *self.payment_failure.lock() = Some(message.to_string());
    }

    pub fn fail_verification(&self, message: &str) {
        *self.verify_failure.lock() = Some(message.to_string());
    }

    pub fn fail_health(&self, message: &str) {
        *self.health_failure.lock() = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.as_str() == name).count()
    }

    pub fn payments(&self) -> Vec<PaymentRequest> {
        self.payments.lock().clone()
    }

    pub fn verifications(&self) -> Vec<VerificationRequest> {
        self.verifications.lock().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().push(call.to_string());
    }
}

#[async_trait]
impl Gateway for ScriptedGateway {
    async fn health_check(&self) -> GatewayResult<HealthStatus> {
        self.record("health_check");
        match self.health_failure.lock().clone() {
            Some(message) => Err(rejected("/health", &message)),
            None => Ok(HealthStatus {
                status: Some("healthy".into()),
                extra: Map::new(),
            }),
        }
    }

    async fn list_organs(&self) -> GatewayResult<Vec<OrganRecord>> {
        self.record("list_organs");
        let next = self.script.lock().pop_front();
        match next {
            Some(script) => {
                tokio::time::sleep(script.delay).await;
                script.outcome.map_err(|m| rejected("/api/organs", &m))
            }
            None => Ok(self.steady.lock().clone()),
        }
    }

    async fn get_organ(&self, organ_id: &str) -> GatewayResult<OrganRecord> {
        self.record("get_organ");
        self.steady
            .lock()
            .iter()
            .find(|o| o.id == organ_id)
            .cloned()
            .ok_or_else(|| rejected("/api/organs/:id", "Organ not found"))
    }

    async fn diagnose_organ(&self, organ_id: &str) -> GatewayResult<Value> {
        self.record("diagnose_organ");
        Ok(json!({ "organId": organ_id, "diagnosed": true }))
    }

    async fn diagnose_all(&self) -> GatewayResult<Value> {
        self.record("diagnose_all");
        match self.diagnose_failure.lock().clone() {
            Some(message) => Err(rejected("/api/organs/diagnose-all", &message)),
            None => Ok(json!({ "diagnosed": 3 })),
        }
    }

    async fn quota_status(&self) -> GatewayResult<QuotaStatus> {
        self.record("quota_status");
        Ok(self.quota.lock().clone())
    }

    async fn initialize_payment(&self, request: &PaymentRequest) -> GatewayResult<PaymentLink> {
        self.record("initialize_payment");
        self.payments.lock().push(request.clone());
        match self.payment_failure.lock().clone() {
            Some(message) => Err(rejected("/api/vials/initialize", &message)),
            None => Ok(PaymentLink {
                payment_link: format!("https://pay.example/{}", request.organ_id),
                extra: Map::new(),
            }),
        }
    }

    async fn vials_for_organ(&self, organ_id: &str) -> GatewayResult<Vec<VialRecord>> {
        self.record("vials_for_organ");
        Ok(vec![VialRecord {
            id: Some(format!("{organ_id}-v1")),
            amount: Some(100.0),
            currency: Some("USD".into()),
            status: Some("successful".into()),
            created_at: None,
            extra: Map::new(),
        }])
    }

    async fn verify_restoration(
        &self,
        request: &VerificationRequest,
    ) -> GatewayResult<VerificationOutcome> {
        self.record("verify_restoration");
        self.verifications.lock().push(request.clone());
        match self.verify_failure.lock().clone() {
            Some(message) => Err(rejected("/api/verify", &message)),
            None => Ok(VerificationOutcome {
                verification: Verdict {
                    verified: true,
                    analysis: "Visible regrowth".into(),
                    confidence: 91.0,
                },
                previous_state: Some(SymptomState::Inflamed),
                new_state: Some(SymptomState::Healing),
            }),
        }
    }
}

/// Everything the synchronizer told the panel, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    Organs(Vec<String>),
    Quota(QuotaStatus),
    Selection(String),
    Notify(Notification),
    Busy(PanelAction, bool),
    PaymentLink(String, String),
    Verification(String, bool),
    Vials(String, usize),
    Diagnosis(Option<String>),
}

#[derive(Default)]
pub struct RecordingPanel {
    events: Mutex<Vec<PanelEvent>>,
}

impl RecordingPanel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<PanelEvent> {
        self.events.lock().clone()
    }

    pub fn notifications(&self, severity: Severity) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                PanelEvent::Notify(n) if n.severity == severity => Some(n.message.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn busy_changes(&self) -> Vec<(PanelAction, bool)> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                PanelEvent::Busy(action, busy) => Some((*action, *busy)),
                _ => None,
            })
            .collect()
    }

    pub fn selections(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                PanelEvent::Selection(id) => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: PanelEvent) {
        self.events.lock().push(event);
    }
}

impl Panel for RecordingPanel {
    fn update_organs(&self, organs: &[OrganRecord]) {
        self.push(PanelEvent::Organs(organs.iter().map(|o| o.id.clone()).collect()));
    }

    fn update_quota(&self, quota: &QuotaStatus) {
        self.push(PanelEvent::Quota(quota.clone()));
    }

    fn show_selection(&self, organ: &OrganRecord) {
        self.push(PanelEvent::Selection(organ.id.clone()));
    }

    fn notify(&self, notification: Notification) {
        self.push(PanelEvent::Notify(notification));
    }

    fn set_busy(&self, action: PanelAction, busy: bool) {
        self.push(PanelEvent::Busy(action, busy));
    }

    fn open_payment_link(&self, organ_id: &str, link: &PaymentLink) {
        self.push(PanelEvent::PaymentLink(
            organ_id.to_string(),
            link.payment_link.clone(),
        ));
    }

    fn show_verification(&self, organ_id: &str, outcome: &VerificationOutcome) {
        self.push(PanelEvent::Verification(
            organ_id.to_string(),
            outcome.verification.verified,
        ));
    }

    fn show_vial_history(&self, organ_id: &str, vials: &[VialRecord]) {
        self.push(PanelEvent::Vials(organ_id.to_string(), vials.len()));
    }

    fn show_diagnosis(&self, organ_id: Option<&str>, _report: &Value) {
        self.push(PanelEvent::Diagnosis(organ_id.map(str::to_string)));
    }
}

/// Config with background polling disabled.
pub fn quiet_config() -> AiyeConfig {
    let mut config = AiyeConfig::default();
    config.auto_update.enabled = false;
    config
}

pub struct Harness {
    pub gateway: Arc<ScriptedGateway>,
    pub panel: Arc<RecordingPanel>,
    pub renderer: Arc<SceneRenderer>,
    pub sync: Arc<Synchronizer>,
}

pub fn harness(gateway: Arc<ScriptedGateway>, config: AiyeConfig) -> Harness {
    let panel = RecordingPanel::new();
    let renderer = Arc::new(SceneRenderer::with_selection_scale(
        OrganModels::placeholders(),
        config.visuals.selection_scale,
    ));
    let sync = Synchronizer::new(gateway.clone(), renderer.clone(), panel.clone(), config);
    Harness {
        gateway,
        panel,
        renderer,
        sync,
    }
}
