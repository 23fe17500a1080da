//! Registration service
//!
//! Creates a user together with their bank account and one budget per
//! category. Everything is validated before anything is stored.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::info;

use crate::audit::EntityType;
use crate::config::Settings;
use crate::error::{FamError, FamResult};
use crate::models::{
    AccountId, AccountKind, Archetype, BankAccount, Budget, BudgetCategory, Money, User,
};
use crate::storage::Storage;

/// Everything needed to register one user
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub archetype: Archetype,
    pub account_number: String,
    pub bank_name: String,
    pub account_kind: AccountKind,
    pub opening_balance: Money,
    /// One limit per category
    pub limits: Vec<(BudgetCategory, Money)>,
}

/// What registration created
#[derive(Debug, Clone)]
pub struct Registration {
    pub user: User,
    pub account: BankAccount,
    /// Ordered by category id
    pub budgets: Vec<Budget>,
}

/// Service for registering users
pub struct RegistrationService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> RegistrationService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Register a user as of `today`
    pub fn register(&self, input: RegisterUser, today: NaiveDate) -> FamResult<Registration> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(FamError::Validation("User name cannot be empty".into()));
        }

        if self.storage.users.name_exists(name)? {
            return Err(FamError::Duplicate {
                entity_type: "User",
                identifier: name.to_string(),
            });
        }

        if input.archetype == Archetype::Angel {
            let age = crate::models::user::age_on(input.date_of_birth, today);
            if age < self.settings.angel_minimum_age {
                return Err(FamError::Validation(format!(
                    "Too young to be an Angel: must be at least {} (is {})",
                    self.settings.angel_minimum_age, age
                )));
            }
        }

        let account_id = AccountId::new(input.account_number.as_str());
        if self.storage.accounts.exists(&account_id)? {
            return Err(FamError::Duplicate {
                entity_type: "Account",
                identifier: account_id.to_string(),
            });
        }

        let account = BankAccount::new(
            account_id.clone(),
            input.bank_name.trim(),
            input.account_kind,
            input.opening_balance,
        );
        account
            .validate()
            .map_err(|e| FamError::Validation(e.to_string()))?;

        let budgets = build_budgets(&account_id, &input.limits)?;

        let warning_threshold = self
            .settings
            .warning_thresholds
            .for_archetype(input.archetype);
        let user = User::new(
            name,
            input.date_of_birth,
            account_id.clone(),
            input.archetype,
            warning_threshold,
        );
        user.validate(today)
            .map_err(|e| FamError::Validation(e.to_string()))?;

        self.storage.accounts.upsert(account.clone())?;
        for budget in &budgets {
            self.storage.budgets.upsert(budget.clone())?;
        }
        self.storage.users.upsert(user.clone())?;

        self.storage.accounts.save()?;
        self.storage.budgets.save()?;
        self.storage.users.save()?;

        self.storage.log_create(
            EntityType::Account,
            account.id.to_string(),
            Some(user.name.clone()),
            &account,
        )?;
        for budget in &budgets {
            self.storage.log_create(
                EntityType::Budget,
                format!("{}/{}", account.id, budget.category.key()),
                Some(user.name.clone()),
                budget,
            )?;
        }
        self.storage.log_create(
            EntityType::User,
            user.id.to_string(),
            Some(user.name.clone()),
            &user,
        )?;

        info!(
            user = %user.name,
            archetype = %user.archetype,
            account = %account.id,
            kind = %account.kind,
            "registered user"
        );

        Ok(Registration {
            user,
            account,
            budgets,
        })
    }
}

fn build_budgets(
    account_id: &AccountId,
    limits: &[(BudgetCategory, Money)],
) -> FamResult<Vec<Budget>> {
    let mut seen = HashSet::new();
    for (category, limit) in limits {
        if !seen.insert(*category) {
            return Err(FamError::Validation(format!(
                "Limit for {} given more than once",
                category
            )));
        }
        if !limit.is_positive() {
            return Err(FamError::Validation(format!(
                "Limit for {} must be greater than zero (got {})",
                category, limit
            )));
        }
        if *limit > Money::MAX {
            return Err(FamError::Validation(format!(
                "Limit for {} cannot exceed {} (got {})",
                category,
                Money::MAX,
                limit
            )));
        }
    }

    BudgetCategory::ALL
        .into_iter()
        .map(|category| {
            limits
                .iter()
                .find(|(c, _)| *c == category)
                .map(|(_, limit)| Budget::new(account_id.clone(), category, *limit))
                .ok_or_else(|| FamError::Validation(format!("Missing limit for {}", category)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::FamPaths;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FamPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
    }

    fn input(name: &str, number: &str, archetype: Archetype) -> RegisterUser {
        RegisterUser {
            name: name.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2012, 3, 4).unwrap(),
            archetype,
            account_number: number.to_string(),
            bank_name: "Maple Bank".to_string(),
            account_kind: AccountKind::Chequing,
            opening_balance: Money::from_dollars(100),
            limits: BudgetCategory::ALL
                .into_iter()
                .map(|c| (c, Money::from_dollars(50)))
                .collect(),
        }
    }

    #[test]
    fn test_register_creates_everything() {
        let (_temp, storage) = create_test_storage();
        let settings = Settings::default();
        let service = RegistrationService::new(&storage, &settings);

        let reg = service
            .register(input("Sam", "111", Archetype::Rebel), today())
            .unwrap();

        assert_eq!(reg.user.warning_threshold, dec!(0.5));
        assert_eq!(reg.budgets.len(), 4);
        assert_eq!(storage.users.count().unwrap(), 1);
        assert_eq!(
            storage.budgets.list_for_account(&reg.account.id).unwrap().len(),
            4
        );
        assert!(storage.paths().users_file().exists());

        let audit = storage.audit().read_all().unwrap();
        assert_eq!(audit.len(), 6);
        assert!(audit.iter().all(|e| e.operation == Operation::Create));
    }

    #[test]
    fn test_threshold_comes_from_settings() {
        let (_temp, storage) = create_test_storage();
        let mut settings = Settings::default();
        settings.warning_thresholds.trouble_maker = dec!(0.6);
        let service = RegistrationService::new(&storage, &settings);

        let reg = service
            .register(input("Tia", "222", Archetype::TroubleMaker), today())
            .unwrap();
        assert_eq!(reg.user.warning_threshold, dec!(0.6));
    }

    #[test]
    fn test_angel_age_boundary() {
        let (_temp, storage) = create_test_storage();
        let settings = Settings::default();
        let service = RegistrationService::new(&storage, &settings);

        let mut young = input("Ana", "333", Archetype::Angel);
        young.date_of_birth = NaiveDate::from_ymd_opt(2010, 6, 2).unwrap();
        let err = service.register(young, today()).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(storage.accounts.count().unwrap(), 0);

        let mut sixteen = input("Ana", "333", Archetype::Angel);
        sixteen.date_of_birth = NaiveDate::from_ymd_opt(2010, 6, 1).unwrap();
        assert!(service.register(sixteen, today()).is_ok());
    }

    #[test]
    fn test_duplicates_rejected() {
        let (_temp, storage) = create_test_storage();
        let settings = Settings::default();
        let service = RegistrationService::new(&storage, &settings);
        service
            .register(input("Sam", "111", Archetype::Rebel), today())
            .unwrap();

        let same_name = service.register(input("SAM", "999", Archetype::Rebel), today());
        assert!(matches!(same_name, Err(FamError::Duplicate { entity_type: "User", .. })));

        let same_account = service.register(input("Alex", " 111 ", Archetype::Rebel), today());
        assert!(matches!(
            same_account,
            Err(FamError::Duplicate { entity_type: "Account", .. })
        ));
    }

    #[test]
    fn test_limits_must_cover_every_category_once() {
        let (_temp, storage) = create_test_storage();
        let settings = Settings::default();
        let service = RegistrationService::new(&storage, &settings);

        let mut missing = input("Sam", "111", Archetype::Rebel);
        missing.limits.pop();
        assert!(service.register(missing, today()).unwrap_err().is_validation());

        let mut repeated = input("Sam", "111", Archetype::Rebel);
        repeated.limits[3] = (BudgetCategory::EatingOut, Money::from_dollars(5));
        assert!(service.register(repeated, today()).unwrap_err().is_validation());

        let mut zero = input("Sam", "111", Archetype::Rebel);
        zero.limits[0].1 = Money::zero();
        assert!(service.register(zero, today()).unwrap_err().is_validation());

        assert_eq!(storage.users.count().unwrap(), 0);
    }

    #[test]
    fn test_huge_limits_and_balance_rejected() {
        let (_temp, storage) = create_test_storage();
        let settings = Settings::default();
        let service = RegistrationService::new(&storage, &settings);
        let huge = Money::new(rust_decimal::Decimal::MAX);

        let mut limits = input("Tia", "222", Archetype::TroubleMaker);
        limits.limits = BudgetCategory::ALL.into_iter().map(|c| (c, huge)).collect();
        let err = service.register(limits, today()).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("cannot exceed"));

        let mut balance = input("Tia", "222", Archetype::TroubleMaker);
        balance.opening_balance = huge;
        assert!(service.register(balance, today()).unwrap_err().is_validation());

        let mut at_cap = input("Tia", "222", Archetype::TroubleMaker);
        at_cap.limits[0].1 = Money::MAX;
        at_cap.opening_balance = Money::MAX;
        assert!(service.register(at_cap, today()).is_ok());
        assert_eq!(storage.users.count().unwrap(), 1);
    }

    #[test]
    fn test_bad_account_details_rejected() {
        let (_temp, storage) = create_test_storage();
        let settings = Settings::default();
        let service = RegistrationService::new(&storage, &settings);

        let mut negative = input("Sam", "111", Archetype::Rebel);
        negative.opening_balance = Money::from_dollars(-1);
        assert!(service.register(negative, today()).unwrap_err().is_validation());

        let mut blank = input("Sam", "  ", Archetype::Rebel);
        blank.bank_name = "Maple".into();
        assert!(service.register(blank, today()).unwrap_err().is_validation());

        let nameless = input("   ", "111", Archetype::Rebel);
        assert!(service.register(nameless, today()).unwrap_err().is_validation());
    }
}
