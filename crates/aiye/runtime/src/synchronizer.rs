//! State synchronizer
//!
//! Owns the organ cache, the quota snapshot and the current selection, and
//! keeps the scene and the panel in step with the gateway.

use std::sync::{Arc, Weak};
use std::time::Duration;

use aiye_gateway::{Gateway, GatewayResult};
use aiye_scene::{SceneRenderer, VisualUpdate};
use aiye_types::{OrganRecord, PaymentLink, QuotaStatus, VerificationOutcome, VialRecord};
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::cache::OrganCache;
use crate::config::AiyeConfig;
use crate::error::{RuntimeError, RuntimeResult};
use crate::intent::{PaymentForm, UserIntent, VerificationForm};
use crate::panel::{Notification, Panel, PanelAction};
use crate::poller::{Poller, PollerState};

/// Keeps organ state, scene materials and the panel consistent.
///
/// Every gateway call runs without holding a lock. Results are published
/// synchronously: the cache swap, the material updates and the panel
/// refresh of one load happen together, and concurrent loads publish in
/// the order they complete.
pub struct Synchronizer {
    gateway: Arc<dyn Gateway>,
    renderer: Arc<SceneRenderer>,
    panel: Arc<dyn Panel>,
    config: AiyeConfig,
    organs: RwLock<Arc<OrganCache>>,
    quota: RwLock<Option<QuotaStatus>>,
    selected: RwLock<Option<String>>,
    publish: Mutex<()>,
    poller: Poller,
}

impl Synchronizer {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        renderer: Arc<SceneRenderer>,
        panel: Arc<dyn Panel>,
        config: AiyeConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            gateway,
            renderer,
            panel,
            config,
            organs: RwLock::new(Arc::new(OrganCache::default())),
            quota: RwLock::new(None),
            selected: RwLock::new(None),
            publish: Mutex::new(()),
            poller: Poller::new(),
        })
    }

    pub fn config(&self) -> &AiyeConfig {
        &self.config
    }

    pub fn renderer(&self) -> &Arc<SceneRenderer> {
        &self.renderer
    }

    /// Probe the gateway, load organs and quota, then start polling if
    /// configured to. Nothing here is fatal.
    pub async fn init(self: &Arc<Self>) {
        match self.gateway.health_check().await {
            Ok(health) => info!(status = ?health.status, "Gateway reachable"),
            Err(e) => {
                warn!(error = %e, "Gateway health check failed");
                self.panel
                    .notify(Notification::error(format!("Gateway unavailable: {e}")));
            }
        }

        // failures are already surfaced to the panel
        let _ = self.load_organs().await;
        let _ = self.update_quota().await;

        let auto = &self.config.auto_update;
        if auto.enabled && auto.on_startup {
            self.start_polling(auto.interval());
        }
    }

    // ========== Loading ==========

    /// Fetch every organ and replace the cache with the result.
    ///
    /// On failure the cache is left as it was and the panel is notified;
    /// the error is still returned for callers that want it.
    pub async fn load_organs(&self) -> GatewayResult<Vec<OrganRecord>> {
        let records = match self.gateway.list_organs().await {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, "Failed to load organs");
                self.panel
                    .notify(Notification::error(format!("Failed to load organs: {e}")));
                return Err(e);
            }
        };

        self.publish_organs(&records);
        Ok(records)
    }

    fn publish_organs(&self, records: &[OrganRecord]) {
        let cache = Arc::new(OrganCache::from_records(records.iter().cloned()));

        let _publishing = self.publish.lock();
        *self.organs.write() = cache.clone();
        info!(count = cache.len(), "Organ cache replaced");

        let thresholds = &self.config.health_thresholds;
        for organ in cache.records() {
            let derived = thresholds.symptom_state(organ.health_score);
            if derived != organ.symptom_state {
                debug!(
                    organ_id = %organ.id,
                    reported = %organ.symptom_state,
                    derived = %derived,
                    "Reported symptom state differs from local thresholds"
                );
            }
            if self.renderer.update_organ_visuals(organ) == VisualUpdate::NoModel {
                debug!(organ_id = %organ.id, organ_type = %organ.organ_type, "No model for organ");
            }
        }
        self.panel.update_organs(cache.records());
    }

    /// Fetch the quota snapshot and hand it to the panel.
    pub async fn update_quota(&self) -> GatewayResult<QuotaStatus> {
        match self.gateway.quota_status().await {
            Ok(quota) => {
                *self.quota.write() = Some(quota.clone());
                self.panel.update_quota(&quota);
                Ok(quota)
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch quota status");
                self.panel
                    .notify(Notification::error(format!("Failed to fetch quota: {e}")));
                Err(e)
            }
        }
    }

    /// `load_organs` then `update_quota`. Failures are already surfaced.
    pub async fn refresh(&self) {
        let _ = self.load_organs().await;
        let _ = self.update_quota().await;
    }

    // ========== Selection ==========

    /// Select an organ. Unknown ids leave the selection untouched.
    pub fn select_organ(&self, organ_id: &str) -> Option<OrganRecord> {
        let Some(organ) = self.organ(organ_id) else {
            debug!(organ_id = %organ_id, "Ignoring selection of unknown organ");
            return None;
        };

        *self.selected.write() = Some(organ.id.clone());
        debug!(organ_id = %organ.id, "Organ selected");
        self.panel.show_selection(&organ);
        self.renderer.highlight(organ.organ_type);
        Some(organ)
    }

    pub fn selected_id(&self) -> Option<String> {
        self.selected.read().clone()
    }

    /// The selected organ's current record, if it is still cached.
    pub fn selected(&self) -> Option<OrganRecord> {
        let id = self.selected_id()?;
        self.organ(&id)
    }

    // ========== Actions ==========

    /// Ask the gateway to re-score every organ, then refresh whatever the
    /// outcome.
    pub async fn diagnose_all(&self) -> GatewayResult<Value> {
        self.panel.set_busy(PanelAction::DiagnoseAll, true);
        let result = self.gateway.diagnose_all().await;
        self.refresh().await;

        match &result {
            Ok(report) => {
                info!("Diagnostic scan complete");
                self.panel.show_diagnosis(None, report);
                self.panel
                    .notify(Notification::success("Diagnostic scan complete"));
            }
            Err(e) => {
                error!(error = %e, "Diagnose all failed");
                self.panel
                    .notify(Notification::error(format!("Diagnostic failed: {e}")));
            }
        }
        self.panel.set_busy(PanelAction::DiagnoseAll, false);
        result
    }

    /// Re-score one organ, then refresh. `Ok(None)` for an unknown id.
    pub async fn diagnose_organ(&self, organ_id: &str) -> GatewayResult<Option<Value>> {
        if self.organ(organ_id).is_none() {
            debug!(organ_id = %organ_id, "Ignoring diagnosis of unknown organ");
            return Ok(None);
        }

        self.panel.set_busy(PanelAction::Diagnose, true);
        let result = self.gateway.diagnose_organ(organ_id).await;
        self.refresh().await;

        let outcome = match result {
            Ok(report) => {
                self.panel.show_diagnosis(Some(organ_id), &report);
                self.panel.notify(Notification::success("Diagnosis complete"));
                Ok(Some(report))
            }
            Err(e) => {
                error!(organ_id = %organ_id, error = %e, "Diagnosis failed");
                self.panel
                    .notify(Notification::error(format!("Diagnostic failed: {e}")));
                Err(e)
            }
        };
        self.panel.set_busy(PanelAction::Diagnose, false);
        outcome
    }

    /// Start a vial payment for the selected organ and hand the checkout
    /// link to the panel. Organs are reloaded once the configured delay
    /// has passed.
    pub async fn pay(self: &Arc<Self>, form: &PaymentForm) -> RuntimeResult<PaymentLink> {
        let organ_id = self.require_selection()?;
        let payment = &self.config.payment;
        if let Err(e) = form.validate(payment) {
            self.panel
                .notify(Notification::error(format!("Please check the payment form: {e}")));
            return Err(e.into());
        }

        let request = form.to_request(&organ_id, &payment.default_currency);
        self.panel.set_busy(PanelAction::Pay, true);
        let result = self.gateway.initialize_payment(&request).await;
        self.panel.set_busy(PanelAction::Pay, false);

        match result {
            Ok(link) => {
                info!(organ_id = %organ_id, amount = request.amount, "Payment initialized");
                self.panel.open_payment_link(&organ_id, &link);
                self.panel.notify(Notification::success("Payment window opened"));
                self.schedule_reload(payment.reload_delay());
                Ok(link)
            }
            Err(e) => {
                error!(organ_id = %organ_id, error = %e, "Payment initialization failed");
                self.panel.notify(Notification::error(format!(
                    "Payment initialization failed: {e}"
                )));
                Err(e.into())
            }
        }
    }

    fn schedule_reload(self: &Arc<Self>, delay: Duration) {
        let weak = Arc::downgrade(self);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(sync) = weak.upgrade() {
                let _ = sync.load_organs().await;
            }
        });
    }

    /// Submit restoration evidence for the selected organ.
    pub async fn verify(&self, form: &VerificationForm) -> RuntimeResult<VerificationOutcome> {
        let organ_id = self.require_selection()?;
        if let Err(e) = form.image.validate(&self.config.verification) {
            self.panel
                .notify(Notification::error(format!("Please select a valid image: {e}")));
            return Err(e.into());
        }

        self.panel.set_busy(PanelAction::Verify, true);
        let result = self.submit_verification(&organ_id, form).await;
        self.panel.set_busy(PanelAction::Verify, false);
        result
    }

    async fn submit_verification(
        &self,
        organ_id: &str,
        form: &VerificationForm,
    ) -> RuntimeResult<VerificationOutcome> {
        let outcome = match self.gateway.verify_restoration(&form.to_request(organ_id)).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(organ_id = %organ_id, error = %e, "Verification failed");
                self.panel
                    .notify(Notification::error(format!("Verification failed: {e}")));
                return Err(e.into());
            }
        };

        info!(
            organ_id = %organ_id,
            verified = outcome.verification.verified,
            confidence = outcome.verification.confidence,
            "Verification complete"
        );
        self.panel.show_verification(organ_id, &outcome);
        let _ = self.load_organs().await;
        self.panel.notify(Notification::success("Verification complete"));
        Ok(outcome)
    }

    /// Payment history for an organ.
    pub async fn show_vials(&self, organ_id: &str) -> GatewayResult<Vec<VialRecord>> {
        match self.gateway.vials_for_organ(organ_id).await {
            Ok(vials) => {
                self.panel.show_vial_history(organ_id, &vials);
                Ok(vials)
            }
            Err(e) => {
                error!(organ_id = %organ_id, error = %e, "Failed to fetch vials");
                self.panel
                    .notify(Notification::error(format!("Failed to fetch vials: {e}")));
                Err(e)
            }
        }
    }

    fn require_selection(&self) -> RuntimeResult<String> {
        self.selected_id().ok_or_else(|| {
            self.panel.notify(Notification::error("Select an organ first"));
            RuntimeError::NoSelection
        })
    }

    /// Single entry point for panel intents. Failures have already been
    /// shown to the user by the time this returns.
    pub async fn dispatch(self: &Arc<Self>, intent: UserIntent) -> RuntimeResult<()> {
        debug!(intent = intent_name(&intent), "Dispatching intent");
        match intent {
            UserIntent::Select(id) => {
                self.select_organ(&id);
            }
            UserIntent::DiagnoseAll => {
                self.diagnose_all().await?;
            }
            UserIntent::Diagnose(id) => {
                self.diagnose_organ(&id).await?;
            }
            UserIntent::Pay(form) => {
                self.pay(&form).await?;
            }
            UserIntent::Verify(form) => {
                self.verify(&form).await?;
            }
            UserIntent::ShowVials(id) => {
                self.show_vials(&id).await?;
            }
            UserIntent::Refresh => self.refresh().await,
        }
        Ok(())
    }

    // ========== Polling ==========

    /// Refresh organs and quota every `interval`. Ticks are not
    /// serialized: whichever fetch completes last wins.
    pub fn start_polling(self: &Arc<Self>, interval: Duration) {
        let weak: Weak<Self> = Arc::downgrade(self);
        self.poller.start(interval, move || {
            let weak = weak.clone();
            async move {
                if let Some(sync) = weak.upgrade() {
                    sync.refresh().await;
                }
            }
        });
    }

    /// Stop scheduling refreshes. A fetch already in flight still lands.
    pub fn stop_polling(&self) -> bool {
        self.poller.stop()
    }

    pub fn polling_state(&self) -> PollerState {
        self.poller.state()
    }

    // ========== Rendering ==========

    /// Forward the animation clock to every cached organ's model.
    pub fn advance(&self, time: f32) {
        let types = self.organs.read().organ_types();
        self.renderer.advance(types, time);
    }

    // ========== Snapshots ==========

    /// Cached organs in gateway order.
    pub fn organs(&self) -> Vec<OrganRecord> {
        self.organs.read().records().to_vec()
    }

    pub fn organ(&self, organ_id: &str) -> Option<OrganRecord> {
        self.organs.read().get(organ_id).cloned()
    }

    pub fn quota(&self) -> Option<QuotaStatus> {
        self.quota.read().clone()
    }
}

fn intent_name(intent: &UserIntent) -> &'static str {
    match intent {
        UserIntent::Select(_) => "select",
        UserIntent::DiagnoseAll => "diagnose_all",
        UserIntent::Diagnose(_) => "diagnose",
        UserIntent::Pay(_) => "pay",
        UserIntent::Verify(_) => "verify",
        UserIntent::ShowVials(_) => "show_vials",
        UserIntent::Refresh => "refresh",
    }
}
