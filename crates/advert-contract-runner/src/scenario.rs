// crates/advert-contract-runner/src/scenario.rs
// ============================================================================
// Module: Contract Scenarios
// Description: Scenario catalog and the step context that executes it.
// Purpose: Drive ordered contract steps and attribute failures to a step.
// Dependencies: advert-contract-core, advert-contract-http, serde
// ============================================================================

//! ## Overview
//! A scenario is an ordered list of steps. Each step issues one request,
//! verifies the response against a contract [`Expectation`], and applies any
//! relational checks on the decoded body. The first failing step aborts the
//! scenario; its [`StepFailure`] names the step, the operation, and either
//! the contract violations or the infrastructure error.
//! Invariants:
//! - Scenarios share nothing except the run-wide [`IdLedger`].
//! - Advertisements created by an aborted scenario are left in place.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Mutex;
use std::sync::PoisonError;

use advert_contract_core::Advertisement;
use advert_contract_core::AdvertisementId;
use advert_contract_core::ApiRequest;
use advert_contract_core::ApiVersion;
use advert_contract_core::ContractModel;
use advert_contract_core::CreateAdvertisement;
use advert_contract_core::Expectation;
use advert_contract_core::FixtureGenerator;
use advert_contract_core::ObservedBody;
use advert_contract_core::Operation;
use advert_contract_core::Outcome;
use advert_contract_core::Route;
use advert_contract_core::RouteTable;
use advert_contract_core::SellerId;
use advert_contract_core::Violation;
use advert_contract_core::contract::checks::check_echo;
use advert_contract_core::contract::checks::check_empty;
use advert_contract_core::contract::checks::check_first_id;
use advert_contract_core::contract::checks::check_membership;
use advert_contract_core::contract::checks::check_seller_filter;
use advert_contract_core::contract::checks::check_statistics_consistency;
use advert_contract_core::contract::checks::check_unique_ids;
use advert_contract_core::core::fixtures::NON_INTEGER_SELLER;
use advert_contract_core::core::fixtures::RESERVED_CHAR_ID;
use advert_contract_core::core::fixtures::canonical_example;
use advert_contract_core::core::fixtures::oversized_id;
use advert_contract_http::Transport;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Scenarios known to the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// Create a valid advertisement and check the echo.
    CreateAdvertisement,
    /// Create without `statistics`.
    CreateMissingStatistics,
    /// Create with a text `sellerID`.
    CreateWrongFieldType,
    /// Create then read by id.
    ReadById,
    /// Read a never-issued id.
    ReadUnknownId,
    /// Read an oversized id.
    ReadOversizedId,
    /// Create two advertisements for one seller and list them.
    ListBySeller,
    /// List a seller that never had advertisements.
    ListUnusedSeller,
    /// List a non-integer seller.
    ListInvalidSeller,
    /// Create then read statistics through one version.
    Statistics(ApiVersion),
    /// Read statistics for a never-issued id.
    StatisticsUnknownId,
    /// Create, delete, and confirm deletion is terminal.
    DeleteAdvertisement,
    /// Delete a never-issued id.
    DeleteUnknownId,
    /// Delete an id containing reserved characters.
    DeleteMalformedId,
    /// Create, read, statistics, list, delete, read.
    FullLifecycle,
    /// Create several advertisements and compare ids.
    IdUniqueness,
    /// Compare statistics field sets across versions.
    StatisticsConsistency,
    /// Lifecycle of the fixed canonical payload.
    CanonicalExample,
}

impl ScenarioKind {
    /// Returns the catalog for a route table, statistics expanded per version.
    #[must_use]
    pub fn catalog(routes: &RouteTable) -> Vec<Self> {
        let mut catalog = vec![
            Self::CreateAdvertisement,
            Self::CreateMissingStatistics,
            Self::CreateWrongFieldType,
            Self::ReadById,
            Self::ReadUnknownId,
            Self::ReadOversizedId,
            Self::ListBySeller,
            Self::ListUnusedSeller,
            Self::ListInvalidSeller,
        ];
        catalog.extend(routes.statistics.iter().copied().map(Self::Statistics));
        catalog.extend([
            Self::StatisticsUnknownId,
            Self::DeleteAdvertisement,
            Self::DeleteUnknownId,
            Self::DeleteMalformedId,
            Self::FullLifecycle,
            Self::IdUniqueness,
            Self::StatisticsConsistency,
            Self::CanonicalExample,
        ]);
        catalog
    }

    /// Returns the stable scenario name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CreateAdvertisement => "create_advertisement",
            Self::CreateMissingStatistics => "create_missing_statistics",
            Self::CreateWrongFieldType => "create_wrong_field_type",
            Self::ReadById => "read_by_id",
            Self::ReadUnknownId => "read_unknown_id",
            Self::ReadOversizedId => "read_oversized_id",
            Self::ListBySeller => "list_by_seller",
            Self::ListUnusedSeller => "list_unused_seller",
            Self::ListInvalidSeller => "list_invalid_seller",
            Self::Statistics(ApiVersion::V1) => "statistics_v1",
            Self::Statistics(ApiVersion::V2) => "statistics_v2",
            Self::StatisticsUnknownId => "statistics_unknown_id",
            Self::DeleteAdvertisement => "delete_advertisement",
            Self::DeleteUnknownId => "delete_unknown_id",
            Self::DeleteMalformedId => "delete_malformed_id",
            Self::FullLifecycle => "full_lifecycle",
            Self::IdUniqueness => "id_uniqueness",
            Self::StatisticsConsistency => "statistics_consistency",
            Self::CanonicalExample => "canonical_example",
        }
    }

    /// Returns a one-line description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::CreateAdvertisement => "create returns the full entity echoing the payload",
            Self::CreateMissingStatistics => "create without statistics is rejected with 400",
            Self::CreateWrongFieldType => "create with a text sellerID is rejected with 400",
            Self::ReadById => "read by id returns a sequence led by the requested id",
            Self::ReadUnknownId => "read of a never-issued id returns 404",
            Self::ReadOversizedId => "read of an oversized id returns 400 or 404",
            Self::ListBySeller => "list by seller returns only and all of that seller's items",
            Self::ListUnusedSeller => "list for a seller without items returns an empty sequence",
            Self::ListInvalidSeller => "list with a non-integer seller returns 400",
            Self::Statistics(_) => "statistics of a new item are a non-empty sequence",
            Self::StatisticsUnknownId => "statistics of a never-issued id return 404",
            Self::DeleteAdvertisement => "delete succeeds once, then read and delete return 404",
            Self::DeleteUnknownId => "delete of a never-issued id returns 404",
            Self::DeleteMalformedId => "delete of an id with reserved characters returns 400 or 404",
            Self::FullLifecycle => "create, read, statistics, list, delete, read",
            Self::IdUniqueness => "consecutive creations receive distinct ids",
            Self::StatisticsConsistency => "statistics versions report the same field set",
            Self::CanonicalExample => "lifecycle of the fixed example payload",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// SECTION: Failures
// ============================================================================

/// Why a step failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureKind {
    /// The service broke the contract.
    Contract {
        /// Expectation the response was checked against, when one applied.
        expectation: Option<Expectation>,
        /// Every mismatch found.
        violations: Vec<Violation>,
    },
    /// No usable response was obtained.
    Infrastructure {
        /// Error description.
        error: String,
    },
}

/// Failure attributed to one scenario step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepFailure {
    /// Step name.
    pub step: String,
    /// Operation the step exercised.
    pub operation: Operation,
    /// Request line of the step.
    pub route: String,
    /// Failure detail.
    pub kind: FailureKind,
}

impl StepFailure {
    /// Returns true when the failure is a contract violation.
    #[must_use]
    pub const fn is_violation(&self) -> bool {
        matches!(self.kind, FailureKind::Contract { .. })
    }
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} ({}, {}): ", self.step, self.operation, self.route)?;
        match &self.kind {
            FailureKind::Contract {
                violations, ..
            } => {
                for (index, violation) in violations.iter().enumerate() {
                    if index > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{violation}")?;
                }
                Ok(())
            }
            FailureKind::Infrastructure {
                error,
            } => write!(f, "infrastructure error: {error}"),
        }
    }
}

// ============================================================================
// SECTION: Step Records
// ============================================================================

/// Log entry for one executed step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Step name.
    pub name: String,
    /// Operation exercised.
    pub operation: Operation,
    /// Request line.
    pub route: String,
    /// Response status, when a response arrived.
    pub status: Option<u16>,
    /// Whether the step satisfied the contract.
    pub passed: bool,
}

// ============================================================================
// SECTION: Identifier Ledger
// ============================================================================

/// Run-wide record of issued advertisement identifiers.
#[derive(Debug, Default)]
pub struct IdLedger {
    /// Identifiers seen so far.
    ids: Mutex<BTreeSet<AdvertisementId>>,
}

impl IdLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an identifier, returning a violation when it was issued before.
    pub fn record(&self, id: &AdvertisementId) -> Vec<Violation> {
        let mut ids = self.ids.lock().unwrap_or_else(PoisonError::into_inner);
        if ids.insert(id.clone()) {
            return Vec::new();
        }
        check_unique_ids([id, id])
    }

    /// Returns the number of identifiers recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true when no identifier was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// SECTION: Scenario Context
// ============================================================================

/// Execution state of one scenario.
pub struct ScenarioContext<'a> {
    /// Transport to the service.
    transport: &'a dyn Transport,
    /// Contract model.
    model: &'a ContractModel,
    /// Run-wide identifier ledger.
    ledger: &'a IdLedger,
    /// Scenario-local fixtures.
    fixtures: FixtureGenerator,
    /// Creations performed by the uniqueness scenario.
    uniqueness_samples: usize,
    /// Executed steps.
    steps: Vec<StepRecord>,
}

impl<'a> ScenarioContext<'a> {
    /// Creates a context for one scenario.
    #[must_use]
    pub fn new(
        transport: &'a dyn Transport,
        model: &'a ContractModel,
        ledger: &'a IdLedger,
        fixtures: FixtureGenerator,
        uniqueness_samples: usize,
    ) -> Self {
        Self {
            transport,
            model,
            ledger,
            fixtures,
            uniqueness_samples,
            steps: Vec::new(),
        }
    }

    /// Returns the steps executed so far.
    #[must_use]
    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// Consumes the context and returns its step log.
    #[must_use]
    pub fn into_steps(self) -> Vec<StepRecord> {
        self.steps
    }

    /// Runs a scenario to completion or to its first failing step.
    ///
    /// # Errors
    ///
    /// Returns the [`StepFailure`] of the first failing step.
    pub async fn run(&mut self, kind: ScenarioKind) -> Result<(), StepFailure> {
        match kind {
            ScenarioKind::CreateAdvertisement => {
                let payload = self.fixtures.advertisement(None);
                self.create("create", &payload).await.map(drop)
            }
            ScenarioKind::CreateMissingStatistics => {
                let body = self.fixtures.missing_statistics();
                self.create_rejected("create_without_statistics", body).await
            }
            ScenarioKind::CreateWrongFieldType => {
                let body = self.fixtures.wrong_seller_type();
                self.create_rejected("create_with_text_seller", body).await
            }
            ScenarioKind::ReadById => {
                let payload = self.fixtures.advertisement(None);
                let created = self.create("create", &payload).await?;
                self.read("read", &created.id).await.map(drop)
            }
            ScenarioKind::ReadUnknownId => {
                let id = self.fixtures.unknown_id();
                self.read_expecting("read_unknown", id.as_str(), Outcome::NotFound).await
            }
            ScenarioKind::ReadOversizedId => {
                let id = oversized_id();
                self.read_expecting("read_oversized", &id, Outcome::AmbiguousIdentifier).await
            }
            ScenarioKind::ListBySeller => self.list_by_seller().await,
            ScenarioKind::ListUnusedSeller => {
                let seller = self.fixtures.unused_seller_id();
                let listed = self.list("list_unused_seller", seller).await?;
                self.ensure("list_unused_seller", &listed.route, check_empty(&listed.items))
            }
            ScenarioKind::ListInvalidSeller => {
                let route = self.routes().list_route(NON_INTEGER_SELLER);
                let step = "list_invalid_seller";
                self.exchange(step, ApiRequest::new(route), Outcome::ValidationError).await.map(drop)
            }
            ScenarioKind::Statistics(version) => {
                let payload = self.fixtures.advertisement(None);
                let created = self.create("create", &payload).await?;
                self.statistics(&format!("statistics_{version}"), version, &created.id)
                    .await
                    .map(drop)
            }
            ScenarioKind::StatisticsUnknownId => {
                let version = self.primary_statistics_version();
                let id = self.fixtures.unknown_id();
                let route = RouteTable::statistics_route(version, id.as_str());
                self.exchange("statistics_unknown", ApiRequest::new(route), Outcome::NotFound)
                    .await
                    .map(drop)
            }
            ScenarioKind::DeleteAdvertisement => {
                let payload = self.fixtures.advertisement(None);
                let created = self.create("create", &payload).await?;
                self.delete_expecting("delete", created.id.as_str(), Outcome::Success).await?;
                self.read_expecting("read_after_delete", created.id.as_str(), Outcome::NotFound)
                    .await?;
                self.delete_expecting("delete_again", created.id.as_str(), Outcome::NotFound).await
            }
            ScenarioKind::DeleteUnknownId => {
                let id = self.fixtures.unknown_id();
                self.delete_expecting("delete_unknown", id.as_str(), Outcome::NotFound).await
            }
            ScenarioKind::DeleteMalformedId => {
                self.delete_expecting("delete_malformed", RESERVED_CHAR_ID, Outcome::AmbiguousIdentifier)
                    .await
            }
            ScenarioKind::FullLifecycle => self.full_lifecycle().await,
            ScenarioKind::IdUniqueness => self.id_uniqueness().await,
            ScenarioKind::StatisticsConsistency => self.statistics_consistency().await,
            ScenarioKind::CanonicalExample => {
                let payload = canonical_example();
                let created = self.create("create", &payload).await?;
                let read = self.read("read", &created.id).await?;
                if let Some(first) = read.first() {
                    let route = self.routes().read_route(created.id.as_str()).to_string();
                    self.ensure("read", &route, check_echo(&payload, first, "/0"))?;
                }
                self.delete_expecting("delete", created.id.as_str(), Outcome::Success).await?;
                self.read_expecting("read_after_delete", created.id.as_str(), Outcome::NotFound)
                    .await
            }
        }
    }

    // ------------------------------------------------------------------------
    // Composite scenarios
    // ------------------------------------------------------------------------

    /// Two items for one seller, then a filtered listing containing both.
    async fn list_by_seller(&mut self) -> Result<(), StepFailure> {
        let seller = self.fixtures.seller_id();
        let mut created = Vec::new();
        for index in 1 ..= 2 {
            let payload = self.fixtures.advertisement(Some(seller));
            created.push(self.create(&format!("create_{index}"), &payload).await?.id);
        }
        let listed = self.list("list", seller).await?;
        for id in &created {
            self.ensure("list", &listed.route, check_membership(id, &listed.items))?;
        }
        Ok(())
    }

    /// Create, read, statistics per version, list, delete, read.
    async fn full_lifecycle(&mut self) -> Result<(), StepFailure> {
        let payload = self.fixtures.advertisement(None);
        let created = self.create("create", &payload).await?;
        let read = self.read("read", &created.id).await?;
        if let Some(first) = read.first() {
            let route = self.routes().read_route(created.id.as_str()).to_string();
            self.ensure("read", &route, check_echo(&payload, first, "/0"))?;
        }
        for version in self.routes().statistics.clone() {
            self.statistics(&format!("statistics_{version}"), version, &created.id).await?;
        }
        let listed = self.list("list", payload.seller_id).await?;
        self.ensure("list", &listed.route, check_membership(&created.id, &listed.items))?;
        self.delete_expecting("delete", created.id.as_str(), Outcome::Success).await?;
        self.read_expecting("read_after_delete", created.id.as_str(), Outcome::NotFound).await
    }

    /// Several creations with pairwise distinct ids.
    async fn id_uniqueness(&mut self) -> Result<(), StepFailure> {
        let mut ids = Vec::with_capacity(self.uniqueness_samples);
        for index in 1 ..= self.uniqueness_samples {
            let payload = self.fixtures.advertisement(None);
            let step = format!("create_{index}");
            let created = self.create(&step, &payload).await?;
            ids.push(created.id);
            let route = self.routes().create_route().to_string();
            self.ensure(&step, &route, check_unique_ids(ids.iter()))?;
        }
        Ok(())
    }

    /// One creation, statistics for every version, field sets compared.
    async fn statistics_consistency(&mut self) -> Result<(), StepFailure> {
        let payload = self.fixtures.advertisement(None);
        let created = self.create("create", &payload).await?;
        let mut observed: Vec<(ApiVersion, BTreeSet<String>)> = Vec::new();
        for version in self.routes().statistics.clone() {
            let step = format!("statistics_{version}");
            let fields = self.statistics(&step, version, &created.id).await?;
            if let Some((first_version, first_fields)) = observed.first() {
                let route = RouteTable::statistics_route(version, created.id.as_str()).to_string();
                let violations = check_statistics_consistency(
                    (*first_version, first_fields),
                    (version, &fields),
                );
                self.ensure(&step, &route, violations)?;
            }
            observed.push((version, fields));
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Operation steps
    // ------------------------------------------------------------------------

    /// Creates an advertisement and checks echo and id uniqueness.
    async fn create(
        &mut self,
        step: &str,
        payload: &CreateAdvertisement,
    ) -> Result<Advertisement, StepFailure> {
        let route = self.routes().create_route();
        let request = ApiRequest::with_body(route.clone(), payload.to_json());
        let body = self.exchange(step, request, Outcome::Success).await?;
        let ObservedBody::Entity(created) = body else {
            return Err(self.unexpected_body(step, &route));
        };
        let route = route.to_string();
        self.ensure(step, &route, check_echo(payload, &created, ""))?;
        let duplicates = self.ledger.record(&created.id);
        self.ensure(step, &route, duplicates)?;
        Ok(created)
    }

    /// Submits an invalid create body that must be rejected.
    async fn create_rejected(&mut self, step: &str, body: Value) -> Result<(), StepFailure> {
        let request = ApiRequest::with_body(self.routes().create_route(), body);
        self.exchange(step, request, Outcome::ValidationError).await.map(drop)
    }

    /// Reads an advertisement that must exist.
    async fn read(
        &mut self,
        step: &str,
        id: &AdvertisementId,
    ) -> Result<Vec<Advertisement>, StepFailure> {
        let route = self.routes().read_route(id.as_str());
        let body = self.exchange(step, ApiRequest::new(route.clone()), Outcome::Success).await?;
        let ObservedBody::Entities(items) = body else {
            return Err(self.unexpected_body(step, &route));
        };
        self.ensure(step, &route.to_string(), check_first_id(id, &items))?;
        Ok(items)
    }

    /// Reads a raw identifier expecting a failure outcome.
    async fn read_expecting(
        &mut self,
        step: &str,
        id: &str,
        outcome: Outcome,
    ) -> Result<(), StepFailure> {
        let route = self.routes().read_route(id);
        self.exchange(step, ApiRequest::new(route), outcome).await.map(drop)
    }

    /// Lists a seller's advertisements and checks the seller filter.
    async fn list(&mut self, step: &str, seller: SellerId) -> Result<Listing, StepFailure> {
        let route = self.routes().list_route(&seller.to_string());
        let body = self.exchange(step, ApiRequest::new(route.clone()), Outcome::Success).await?;
        let ObservedBody::Entities(items) = body else {
            return Err(self.unexpected_body(step, &route));
        };
        let route = route.to_string();
        self.ensure(step, &route, check_seller_filter(seller, &items))?;
        Ok(Listing {
            route,
            items,
        })
    }

    /// Reads statistics through one version and returns the reported fields.
    async fn statistics(
        &mut self,
        step: &str,
        version: ApiVersion,
        id: &AdvertisementId,
    ) -> Result<BTreeSet<String>, StepFailure> {
        let route = RouteTable::statistics_route(version, id.as_str());
        let body = self.exchange(step, ApiRequest::new(route.clone()), Outcome::Success).await?;
        let ObservedBody::Statistics {
            fields, ..
        } = body
        else {
            return Err(self.unexpected_body(step, &route));
        };
        Ok(fields)
    }

    /// Deletes a raw identifier expecting `outcome`.
    async fn delete_expecting(
        &mut self,
        step: &str,
        id: &str,
        outcome: Outcome,
    ) -> Result<(), StepFailure> {
        let route = self.routes().delete_route(id);
        self.exchange(step, ApiRequest::new(route), outcome).await.map(drop)
    }

    // ------------------------------------------------------------------------
    // Step plumbing
    // ------------------------------------------------------------------------

    /// Sends one request and verifies it against the expected outcome.
    async fn exchange(
        &mut self,
        step: &str,
        request: ApiRequest,
        outcome: Outcome,
    ) -> Result<ObservedBody, StepFailure> {
        let operation = request.route.operation();
        let route = request.route.to_string();
        let expectation = match self.model.expectation(operation, outcome) {
            Ok(expectation) => expectation,
            Err(err) => {
                return Err(self.fail(step, operation, &route, None, FailureKind::Infrastructure {
                    error: err.to_string(),
                }));
            }
        };
        let response = match self.transport.execute(&request).await {
            Ok(response) => response,
            Err(err) => {
                return Err(self.fail(step, operation, &route, None, FailureKind::Infrastructure {
                    error: err.to_string(),
                }));
            }
        };
        match self.model.verify(&expectation, &response) {
            Ok(body) => {
                self.steps.push(StepRecord {
                    name: step.to_string(),
                    operation,
                    route,
                    status: Some(response.status),
                    passed: true,
                });
                Ok(body)
            }
            Err(violations) => Err(self.fail(
                step,
                operation,
                &route,
                Some(response.status),
                FailureKind::Contract {
                    expectation: Some(expectation),
                    violations,
                },
            )),
        }
    }

    /// Applies relational check results to the most recent step.
    fn ensure(&mut self, step: &str, route: &str, violations: Vec<Violation>) -> Result<(), StepFailure> {
        if violations.is_empty() {
            return Ok(());
        }
        let operation = self.steps.last().map_or(Operation::Create, |record| record.operation);
        if let Some(record) = self.steps.last_mut()
            && record.name == step
        {
            record.passed = false;
        }
        Err(StepFailure {
            step: step.to_string(),
            operation,
            route: route.to_string(),
            kind: FailureKind::Contract {
                expectation: None,
                violations,
            },
        })
    }

    /// Records a failed step and builds its failure.
    fn fail(
        &mut self,
        step: &str,
        operation: Operation,
        route: &str,
        status: Option<u16>,
        kind: FailureKind,
    ) -> StepFailure {
        self.steps.push(StepRecord {
            name: step.to_string(),
            operation,
            route: route.to_string(),
            status,
            passed: false,
        });
        StepFailure {
            step: step.to_string(),
            operation,
            route: route.to_string(),
            kind,
        }
    }

    /// Failure for a verified body that decoded to an unexpected variant.
    fn unexpected_body(&mut self, step: &str, route: &Route) -> StepFailure {
        if let Some(record) = self.steps.last_mut() {
            record.passed = false;
        }
        StepFailure {
            step: step.to_string(),
            operation: route.operation(),
            route: route.to_string(),
            kind: FailureKind::Infrastructure {
                error: "verified body decoded to an unexpected variant".to_string(),
            },
        }
    }

    /// Returns the configured route table.
    fn routes(&self) -> &'a RouteTable {
        self.model.routes()
    }

    /// Version used for single-version statistics probes.
    fn primary_statistics_version(&self) -> ApiVersion {
        self.routes().statistics.first().copied().unwrap_or(ApiVersion::V1)
    }
}

/// Result of a successful list step.
struct Listing {
    /// Request line of the list step.
    route: String,
    /// Listed advertisements.
    items: Vec<Advertisement>,
}
