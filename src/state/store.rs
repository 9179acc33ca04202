//! The FinTrack state store
//!
//! A single mutable container holding the authoritative application data with
//! a key-based subscription mechanism. All notification is synchronous and
//! runs to completion; last write wins, and a subscriber fires exactly once
//! per distinct-value change to its key.
//!
//! Mutations go through a [`Mutation`] guard that records which keys actually
//! changed, so a batch of updates applies once and notifies once per key.

use std::collections::{BTreeSet, HashMap};

use log::debug;

use crate::error::{FinTrackError, FinTrackResult};
use crate::models::{
    Budget, BudgetId, BudgetPeriod, Category, CategoryId, CategoryKind, Expense, ExpenseId,
    Income, IncomeId, ReimbursementStatus, User, Wallet, WalletId,
};

/// The slices of application state a subscriber can watch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StateKey {
    User,
    Wallets,
    Expenses,
    Incomes,
    Categories,
    Budgets,
    SelectedWallet,
    SelectedPeriod,
}

/// Authoritative application data plus UI selection state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub user: Option<User>,
    pub wallets: Vec<Wallet>,
    pub expenses: Vec<Expense>,
    pub incomes: Vec<Income>,
    pub categories: Vec<Category>,
    pub budgets: Vec<Budget>,
    pub selected_wallet: Option<WalletId>,
    pub selected_period: Option<BudgetPeriod>,
}

impl AppState {
    /// Look up a wallet by id
    pub fn wallet(&self, id: WalletId) -> Option<&Wallet> {
        self.wallets.iter().find(|w| w.id == id)
    }

    /// Look up a category by id
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Look up an expense by id
    pub fn expense(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// Look up an income by id
    pub fn income(&self, id: IncomeId) -> Option<&Income> {
        self.incomes.iter().find(|i| i.id == id)
    }

    /// Look up a budget by id
    pub fn budget(&self, id: BudgetId) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.id == id)
    }

    /// Resolve a wallet name, falling back to a short id for dangling refs
    pub fn wallet_name(&self, id: WalletId) -> String {
        self.wallet(id)
            .map(|w| w.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Find a wallet by name (case-insensitive)
    pub fn wallet_by_name(&self, name: &str) -> Option<&Wallet> {
        self.wallets
            .iter()
            .find(|w| w.name.eq_ignore_ascii_case(name))
    }

    /// Diagnostic check of cross-entity invariants
    ///
    /// Returns a description of every broken link: dangling wallet references,
    /// subcategories with missing or non-main parents, and one-sided
    /// reimbursement links.
    pub fn verify_links(&self) -> Vec<String> {
        let mut issues = Vec::new();

        for expense in &self.expenses {
            if self.wallet(expense.wallet_id).is_none() {
                issues.push(format!(
                    "Expense {} references missing wallet {}",
                    expense.id, expense.wallet_id
                ));
            }
            if let Some(income_id) = expense.linked_income_id {
                match self.income(income_id) {
                    None => issues.push(format!(
                        "Expense {} references missing income {}",
                        expense.id, income_id
                    )),
                    Some(income) if !income.linked_expense_ids.contains(&expense.id) => {
                        issues.push(format!(
                            "Expense {} links income {} which does not link back",
                            expense.id, income_id
                        ));
                    }
                    _ => {}
                }
            }
        }

        for income in &self.incomes {
            if self.wallet(income.wallet_id).is_none() {
                issues.push(format!(
                    "Income {} references missing wallet {}",
                    income.id, income.wallet_id
                ));
            }
            for expense_id in &income.linked_expense_ids {
                match self.expense(*expense_id) {
                    None => issues.push(format!(
                        "Income {} references missing expense {}",
                        income.id, expense_id
                    )),
                    Some(expense) if expense.linked_income_id != Some(income.id) => {
                        issues.push(format!(
                            "Income {} links expense {} which does not link back",
                            income.id, expense_id
                        ));
                    }
                    _ => {}
                }
            }
        }

        for category in &self.categories {
            if let Some(parent_id) = category.parent_id {
                match self.category(parent_id) {
                    None => issues.push(format!(
                        "Category {} references missing parent {}",
                        category.id, parent_id
                    )),
                    Some(parent) if parent.kind != CategoryKind::Main => {
                        issues.push(format!(
                            "Category {} has non-main parent {}",
                            category.id, parent_id
                        ));
                    }
                    _ => {}
                }
            }
        }

        for budget in &self.budgets {
            if self.category(budget.category_id).is_none() {
                issues.push(format!(
                    "Budget {} references missing category {}",
                    budget.id, budget.category_id
                ));
            }
            if let Some(wallet_id) = budget.wallet_id {
                if self.wallet(wallet_id).is_none() {
                    issues.push(format!(
                        "Budget {} references missing wallet {}",
                        budget.id, wallet_id
                    ));
                }
            }
        }

        issues
    }
}

/// Handle returned by [`StateStore::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&AppState)>;

struct Subscriber {
    id: SubscriptionId,
    callback: Callback,
}

/// The observable state container
#[derive(Default)]
pub struct StateStore {
    state: AppState,
    subscribers: HashMap<StateKey, Vec<Subscriber>>,
    next_subscription: u64,
}

impl StateStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the current state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Register a callback for changes to one state key
    ///
    /// The callback runs synchronously, after the change has been applied,
    /// with a reference to the full state.
    pub fn subscribe(
        &mut self,
        key: StateKey,
        callback: impl FnMut(&AppState) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.entry(key).or_default().push(Subscriber {
            id,
            callback: Box::new(callback),
        });
        id
    }

    /// Remove a subscription; unknown ids are ignored
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        for subs in self.subscribers.values_mut() {
            subs.retain(|s| s.id != id);
        }
    }

    fn notify(&mut self, key: StateKey) {
        debug!("notify {:?}", key);
        if let Some(subs) = self.subscribers.get_mut(&key) {
            for sub in subs.iter_mut() {
                (sub.callback)(&self.state);
            }
        }
    }

    /// Apply a batch of mutations, then notify each changed key once
    ///
    /// Every mutation goes through this method (the convenience methods below
    /// are one-mutation batches). Keys are notified in a stable order after
    /// the whole batch has been applied.
    pub fn mutate<R>(&mut self, f: impl FnOnce(&mut Mutation<'_>) -> R) -> R {
        let mut mutation = Mutation {
            state: &mut self.state,
            dirty: BTreeSet::new(),
        };
        let result = f(&mut mutation);
        let dirty = mutation.dirty;
        for key in dirty {
            self.notify(key);
        }
        result
    }

    // Convenience single-mutation entry points.

    pub fn set_user(&mut self, user: Option<User>) {
        self.mutate(|m| m.set_user(user));
    }

    pub fn select_wallet(&mut self, wallet: Option<WalletId>) -> FinTrackResult<()> {
        self.mutate(|m| m.select_wallet(wallet))
    }

    pub fn select_period(&mut self, period: Option<BudgetPeriod>) {
        self.mutate(|m| m.select_period(period));
    }

    pub fn add_wallet(&mut self, wallet: Wallet) -> FinTrackResult<()> {
        self.mutate(|m| m.add_wallet(wallet))
    }

    pub fn delete_wallet(&mut self, id: WalletId) -> FinTrackResult<bool> {
        self.mutate(|m| m.delete_wallet(id))
    }

    pub fn add_category(&mut self, category: Category) -> FinTrackResult<()> {
        self.mutate(|m| m.add_category(category))
    }

    pub fn add_expense(&mut self, expense: Expense) -> FinTrackResult<()> {
        self.mutate(|m| m.add_expense(expense))
    }

    pub fn update_expense(&mut self, expense: Expense) -> FinTrackResult<()> {
        self.mutate(|m| m.update_expense(expense))
    }

    pub fn delete_expense(&mut self, id: ExpenseId) -> FinTrackResult<bool> {
        self.mutate(|m| m.delete_expense(id))
    }

    pub fn add_income(&mut self, income: Income) -> FinTrackResult<()> {
        self.mutate(|m| m.add_income(income))
    }

    pub fn delete_income(&mut self, id: IncomeId) -> FinTrackResult<bool> {
        self.mutate(|m| m.delete_income(id))
    }

    pub fn add_budget(&mut self, budget: Budget) -> FinTrackResult<()> {
        self.mutate(|m| m.add_budget(budget))
    }

    pub fn delete_budget(&mut self, id: BudgetId) -> FinTrackResult<bool> {
        self.mutate(|m| m.delete_budget(id))
    }

    pub fn link_reimbursement(
        &mut self,
        income_id: IncomeId,
        expense_ids: &[ExpenseId],
    ) -> FinTrackResult<()> {
        self.mutate(|m| m.link_reimbursement(income_id, expense_ids))
    }

    pub fn unlink_reimbursement(&mut self, income_id: IncomeId) -> FinTrackResult<()> {
        self.mutate(|m| m.unlink_reimbursement(income_id))
    }
}

/// In-flight batch of state changes
///
/// Records which keys were actually modified; the owning store notifies those
/// keys once the batch completes.
pub struct Mutation<'a> {
    state: &'a mut AppState,
    dirty: BTreeSet<StateKey>,
}

impl Mutation<'_> {
    /// Read access to the state mid-batch
    pub fn state(&self) -> &AppState {
        self.state
    }

    fn mark(&mut self, key: StateKey) {
        self.dirty.insert(key);
    }

    pub fn set_user(&mut self, user: Option<User>) {
        if self.state.user != user {
            self.state.user = user;
            self.mark(StateKey::User);
        }
    }

    /// Change the selected wallet; the wallet must exist when Some
    pub fn select_wallet(&mut self, wallet: Option<WalletId>) -> FinTrackResult<()> {
        if let Some(id) = wallet {
            if self.state.wallet(id).is_none() {
                return Err(FinTrackError::wallet_not_found(id.to_string()));
            }
        }
        if self.state.selected_wallet != wallet {
            self.state.selected_wallet = wallet;
            self.mark(StateKey::SelectedWallet);
        }
        Ok(())
    }

    pub fn select_period(&mut self, period: Option<BudgetPeriod>) {
        if self.state.selected_period != period {
            self.state.selected_period = period;
            self.mark(StateKey::SelectedPeriod);
        }
    }

    /// Replace the whole wallet list (backend refresh)
    pub fn set_wallets(&mut self, wallets: Vec<Wallet>) {
        if self.state.wallets != wallets {
            self.state.wallets = wallets;
            self.mark(StateKey::Wallets);
        }
    }

    /// Replace the whole expense list (backend refresh)
    pub fn set_expenses(&mut self, expenses: Vec<Expense>) {
        if self.state.expenses != expenses {
            self.state.expenses = expenses;
            self.mark(StateKey::Expenses);
        }
    }

    /// Replace the whole income list (backend refresh)
    pub fn set_incomes(&mut self, incomes: Vec<Income>) {
        if self.state.incomes != incomes {
            self.state.incomes = incomes;
            self.mark(StateKey::Incomes);
        }
    }

    /// Replace the whole category list (backend refresh)
    pub fn set_categories(&mut self, categories: Vec<Category>) {
        if self.state.categories != categories {
            self.state.categories = categories;
            self.mark(StateKey::Categories);
        }
    }

    /// Replace the whole budget list (backend refresh)
    pub fn set_budgets(&mut self, budgets: Vec<Budget>) {
        if self.state.budgets != budgets {
            self.state.budgets = budgets;
            self.mark(StateKey::Budgets);
        }
    }

    pub fn add_wallet(&mut self, wallet: Wallet) -> FinTrackResult<()> {
        wallet.validate().map_err(FinTrackError::Validation)?;
        if self.state.wallet(wallet.id).is_some() {
            return Err(FinTrackError::Duplicate {
                entity_type: "Wallet",
                identifier: wallet.id.to_string(),
            });
        }
        self.state.wallets.push(wallet);
        self.mark(StateKey::Wallets);
        Ok(())
    }

    pub fn update_wallet(&mut self, wallet: Wallet) -> FinTrackResult<()> {
        wallet.validate().map_err(FinTrackError::Validation)?;
        let existing = self
            .state
            .wallets
            .iter_mut()
            .find(|w| w.id == wallet.id)
            .ok_or_else(|| FinTrackError::wallet_not_found(wallet.id.to_string()))?;
        if *existing != wallet {
            *existing = wallet;
            self.mark(StateKey::Wallets);
        }
        Ok(())
    }

    /// Delete a wallet. Deleting an unknown id is a no-op returning false.
    pub fn delete_wallet(&mut self, id: WalletId) -> FinTrackResult<bool> {
        if self.state.wallet(id).is_none() {
            return Ok(false);
        }
        let referenced = self.state.expenses.iter().any(|e| e.wallet_id == id)
            || self.state.incomes.iter().any(|i| i.wallet_id == id)
            || self.state.budgets.iter().any(|b| b.wallet_id == Some(id));
        if referenced {
            return Err(FinTrackError::Validation(format!(
                "Wallet {} is still referenced by expenses, incomes, or budgets",
                id
            )));
        }
        self.state.wallets.retain(|w| w.id != id);
        self.mark(StateKey::Wallets);
        if self.state.selected_wallet == Some(id) {
            self.state.selected_wallet = None;
            self.mark(StateKey::SelectedWallet);
        }
        Ok(true)
    }

    pub fn add_category(&mut self, category: Category) -> FinTrackResult<()> {
        category.validate().map_err(FinTrackError::Validation)?;
        if self.state.category(category.id).is_some() {
            return Err(FinTrackError::Duplicate {
                entity_type: "Category",
                identifier: category.id.to_string(),
            });
        }
        if let Some(parent_id) = category.parent_id {
            match self.state.category(parent_id) {
                None => {
                    return Err(FinTrackError::category_not_found(parent_id.to_string()));
                }
                Some(parent) if parent.kind != CategoryKind::Main => {
                    return Err(FinTrackError::Validation(
                        "Subcategory parent must be a main category".to_string(),
                    ));
                }
                _ => {}
            }
        }
        self.state.categories.push(category);
        self.mark(StateKey::Categories);
        Ok(())
    }

    /// Delete a category. Deleting an unknown id is a no-op returning false.
    pub fn delete_category(&mut self, id: CategoryId) -> FinTrackResult<bool> {
        if self.state.category(id).is_none() {
            return Ok(false);
        }
        let referenced = self.state.budgets.iter().any(|b| b.category_id == id)
            || self.state.categories.iter().any(|c| c.parent_id == Some(id));
        if referenced {
            return Err(FinTrackError::Validation(format!(
                "Category {} is still referenced by budgets or subcategories",
                id
            )));
        }
        self.state.categories.retain(|c| c.id != id);
        self.mark(StateKey::Categories);
        Ok(true)
    }

    pub fn add_expense(&mut self, mut expense: Expense) -> FinTrackResult<()> {
        if self.state.wallet(expense.wallet_id).is_none() {
            return Err(FinTrackError::wallet_not_found(expense.wallet_id.to_string()));
        }
        if self.state.expense(expense.id).is_some() {
            return Err(FinTrackError::Duplicate {
                entity_type: "Expense",
                identifier: expense.id.to_string(),
            });
        }
        // Reimbursable expenses always start out pending
        if expense.is_reimbursable && expense.reimbursement_status.is_none() {
            expense.reimbursement_status = Some(ReimbursementStatus::Pending);
        }
        expense.validate().map_err(FinTrackError::Validation)?;
        self.state.expenses.push(expense);
        self.mark(StateKey::Expenses);
        Ok(())
    }

    pub fn update_expense(&mut self, expense: Expense) -> FinTrackResult<()> {
        expense.validate().map_err(FinTrackError::Validation)?;
        if self.state.wallet(expense.wallet_id).is_none() {
            return Err(FinTrackError::wallet_not_found(expense.wallet_id.to_string()));
        }
        let existing = self
            .state
            .expenses
            .iter_mut()
            .find(|e| e.id == expense.id)
            .ok_or_else(|| FinTrackError::expense_not_found(expense.id.to_string()))?;
        if *existing != expense {
            *existing = expense;
            self.mark(StateKey::Expenses);
        }
        Ok(())
    }

    /// Delete an expense. Deleting an unknown id is a no-op returning false.
    ///
    /// Any income that listed this expense drops it from its links so the
    /// reimbursement linkage stays bidirectional.
    pub fn delete_expense(&mut self, id: ExpenseId) -> FinTrackResult<bool> {
        if self.state.expense(id).is_none() {
            return Ok(false);
        }
        self.state.expenses.retain(|e| e.id != id);
        self.mark(StateKey::Expenses);
        for income in &mut self.state.incomes {
            if income.linked_expense_ids.contains(&id) {
                income.linked_expense_ids.retain(|e| *e != id);
                income.updated_at = chrono::Utc::now();
                self.dirty.insert(StateKey::Incomes);
            }
        }
        Ok(true)
    }

    pub fn add_income(&mut self, income: Income) -> FinTrackResult<()> {
        income.validate().map_err(FinTrackError::Validation)?;
        if self.state.wallet(income.wallet_id).is_none() {
            return Err(FinTrackError::wallet_not_found(income.wallet_id.to_string()));
        }
        if self.state.income(income.id).is_some() {
            return Err(FinTrackError::Duplicate {
                entity_type: "Income",
                identifier: income.id.to_string(),
            });
        }
        self.state.incomes.push(income);
        self.mark(StateKey::Incomes);
        Ok(())
    }

    pub fn update_income(&mut self, income: Income) -> FinTrackResult<()> {
        income.validate().map_err(FinTrackError::Validation)?;
        if self.state.wallet(income.wallet_id).is_none() {
            return Err(FinTrackError::wallet_not_found(income.wallet_id.to_string()));
        }
        let existing = self
            .state
            .incomes
            .iter_mut()
            .find(|i| i.id == income.id)
            .ok_or_else(|| FinTrackError::income_not_found(income.id.to_string()))?;
        if *existing != income {
            *existing = income;
            self.mark(StateKey::Incomes);
        }
        Ok(())
    }

    /// Delete an income. Deleting an unknown id is a no-op returning false.
    ///
    /// Expenses the income had reimbursed revert to pending.
    pub fn delete_income(&mut self, id: IncomeId) -> FinTrackResult<bool> {
        let Some(income) = self.state.income(id) else {
            return Ok(false);
        };
        let linked = income.linked_expense_ids.clone();
        self.state.incomes.retain(|i| i.id != id);
        self.mark(StateKey::Incomes);
        if self.revert_expenses_to_pending(&linked) {
            self.mark(StateKey::Expenses);
        }
        Ok(true)
    }

    pub fn add_budget(&mut self, budget: Budget) -> FinTrackResult<()> {
        budget.validate().map_err(FinTrackError::Validation)?;
        if self.state.category(budget.category_id).is_none() {
            return Err(FinTrackError::category_not_found(
                budget.category_id.to_string(),
            ));
        }
        if let Some(wallet_id) = budget.wallet_id {
            if self.state.wallet(wallet_id).is_none() {
                return Err(FinTrackError::wallet_not_found(wallet_id.to_string()));
            }
        }
        if self.state.budget(budget.id).is_some() {
            return Err(FinTrackError::Duplicate {
                entity_type: "Budget",
                identifier: budget.id.to_string(),
            });
        }
        self.state.budgets.push(budget);
        self.mark(StateKey::Budgets);
        Ok(())
    }

    pub fn update_budget(&mut self, budget: Budget) -> FinTrackResult<()> {
        budget.validate().map_err(FinTrackError::Validation)?;
        let existing = self
            .state
            .budgets
            .iter_mut()
            .find(|b| b.id == budget.id)
            .ok_or_else(|| FinTrackError::budget_not_found(budget.id.to_string()))?;
        if *existing != budget {
            *existing = budget;
            self.mark(StateKey::Budgets);
        }
        Ok(())
    }

    /// Delete a budget. Deleting an unknown id is a no-op returning false.
    pub fn delete_budget(&mut self, id: BudgetId) -> FinTrackResult<bool> {
        if self.state.budget(id).is_none() {
            return Ok(false);
        }
        self.state.budgets.retain(|b| b.id != id);
        self.mark(StateKey::Budgets);
        Ok(true)
    }

    /// Link an income to the reimbursable expenses it repays
    ///
    /// Marks every listed expense Reimbursed with a back-reference to the
    /// income, and replaces any previous links of this income (the expenses
    /// it no longer covers revert to pending).
    pub fn link_reimbursement(
        &mut self,
        income_id: IncomeId,
        expense_ids: &[ExpenseId],
    ) -> FinTrackResult<()> {
        if self.state.income(income_id).is_none() {
            return Err(FinTrackError::income_not_found(income_id.to_string()));
        }
        for expense_id in expense_ids {
            let expense = self
                .state
                .expense(*expense_id)
                .ok_or_else(|| FinTrackError::expense_not_found(expense_id.to_string()))?;
            if !expense.is_reimbursable {
                return Err(FinTrackError::Validation(format!(
                    "Expense {} is not reimbursable",
                    expense_id
                )));
            }
        }

        let mut links: Vec<ExpenseId> = Vec::new();
        for id in expense_ids {
            if !links.contains(id) {
                links.push(*id);
            }
        }

        // Release expenses from a previous linking that the new list drops
        let dropped: Vec<ExpenseId> = self
            .state
            .income(income_id)
            .map(|income| {
                income
                    .linked_expense_ids
                    .iter()
                    .filter(|id| !links.contains(id))
                    .copied()
                    .collect()
            })
            .unwrap_or_default();
        let mut expenses_touched = self.revert_expenses_to_pending(&dropped);

        let now = chrono::Utc::now();
        for expense in &mut self.state.expenses {
            if links.contains(&expense.id) {
                expense.reimbursement_status = Some(ReimbursementStatus::Reimbursed);
                expense.linked_income_id = Some(income_id);
                expense.updated_at = now;
                expenses_touched = true;
            }
        }
        let income = self
            .state
            .incomes
            .iter_mut()
            .find(|i| i.id == income_id)
            .ok_or_else(|| FinTrackError::income_not_found(income_id.to_string()))?;
        income.is_reimbursement = true;
        income.linked_expense_ids = links;
        income.updated_at = now;

        if expenses_touched {
            self.mark(StateKey::Expenses);
        }
        self.mark(StateKey::Incomes);
        Ok(())
    }

    /// Undo a reimbursement link: linked expenses revert to pending with no
    /// income reference, and the income's link list is cleared
    pub fn unlink_reimbursement(&mut self, income_id: IncomeId) -> FinTrackResult<()> {
        let income = self
            .state
            .income(income_id)
            .ok_or_else(|| FinTrackError::income_not_found(income_id.to_string()))?;
        let linked = income.linked_expense_ids.clone();
        if linked.is_empty() && !income.is_reimbursement {
            return Ok(());
        }

        if self.revert_expenses_to_pending(&linked) {
            self.mark(StateKey::Expenses);
        }
        let income = self
            .state
            .incomes
            .iter_mut()
            .find(|i| i.id == income_id)
            .ok_or_else(|| FinTrackError::income_not_found(income_id.to_string()))?;
        income.is_reimbursement = false;
        income.linked_expense_ids.clear();
        income.updated_at = chrono::Utc::now();
        self.mark(StateKey::Incomes);
        Ok(())
    }

    fn revert_expenses_to_pending(&mut self, ids: &[ExpenseId]) -> bool {
        let mut changed = false;
        let now = chrono::Utc::now();
        for expense in &mut self.state.expenses {
            if ids.contains(&expense.id) {
                expense.reimbursement_status = Some(ReimbursementStatus::Pending);
                expense.linked_income_id = None;
                expense.updated_at = now;
                changed = true;
            }
        }
        changed
    }
}
