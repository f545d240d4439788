/// Lifecycle state of the bank account. Never set directly by the user:
/// derived from the presence of the first-deposit date on every write.
/// Blocked/Closed can still arrive from legacy rows and round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    Active,
    PendingActivation,
    Blocked,
    Closed,
}

impl AccountStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Активний",
            Self::PendingActivation => "Очікує активацію",
            Self::Blocked => "Заблокований",
            Self::Closed => "Закритий",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "Активний" => Some(Self::Active),
            "Очікує активацію" => Some(Self::PendingActivation),
            "Заблокований" => Some(Self::Blocked),
            "Закритий" => Some(Self::Closed),
            _ => None,
        }
    }

    pub fn derive(date_first_deposit: Option<&str>) -> Self {
        match date_first_deposit {
            Some(d) if !d.trim().is_empty() => Self::Active,
            _ => Self::PendingActivation,
        }
    }
}

/// Lifecycle state of the physical card tied to the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardStatus {
    #[default]
    Issuing,
    AtBranch,
    AtOrganization,
    Activated,
}

impl CardStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Issuing => "На випуску",
            Self::AtBranch => "На відділенні",
            Self::AtOrganization => "На організації",
            Self::Activated => "Активована",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "На випуску" => Some(Self::Issuing),
            "На відділенні" => Some(Self::AtBranch),
            "На організації" => Some(Self::AtOrganization),
            "Активована" => Some(Self::Activated),
            _ => None,
        }
    }
}

/// Which of the three client documents have been signed/received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Documents {
    pub contract: bool,
    pub passport: bool,
    pub questionnaire: bool,
}

impl Documents {
    /// Composite export label: comma-joined names of the set flags.
    /// Import does not parse this back (it reads the three dedicated
    /// columns), so the asymmetry is intentional.
    pub fn label(&self) -> String {
        let mut parts = Vec::new();
        if self.contract {
            parts.push("договір");
        }
        if self.passport {
            parts.push("паспорт");
        }
        if self.questionnaire {
            parts.push("опитувальник");
        }
        parts.join(", ")
    }
}

/// One account-opening entry as stored.
#[derive(Debug, Clone)]
pub struct Record {
    pub id: i64,
    pub fio: String,
    pub ipn: String,
    pub organization: String,
    pub date_opened: String,
    pub date_first_deposit: Option<String>,
    pub account_status: AccountStatus,
    pub card_status: CardStatus,
    pub documents: Documents,
    pub comment: String,
}

/// Insert/update payload: everything the user controls. The account
/// status is derived by the store at write time.
#[derive(Debug, Clone, Default)]
pub struct NewRecord {
    pub fio: String,
    pub ipn: String,
    pub organization: String,
    pub date_opened: String,
    pub date_first_deposit: Option<String>,
    pub card_status: CardStatus,
    pub documents: Documents,
    pub comment: String,
}

impl NewRecord {
    pub fn account_status(&self) -> AccountStatus {
        AccountStatus::derive(self.date_first_deposit.as_deref())
    }
}

/// Outcome of one import run: row count, successes, 1-based row errors.
#[derive(Debug, Default)]
pub struct ImportResult {
    pub total: usize,
    pub success: usize,
    pub errors: Vec<String>,
}
