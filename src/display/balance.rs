//! Balance display formatting

use crate::models::{User, UserBalance};

use super::format_amount;

/// Format the balance table in sheet column order, with a total line
pub fn format_balance_list(balances: &[UserBalance], symbol: &str) -> String {
    if balances.is_empty() {
        return "No users found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:3} {:20} {:>12}\n", "#", "User", "Balance"));
    output.push_str(&"-".repeat(37));
    output.push('\n');

    for (i, ub) in balances.iter().enumerate() {
        output.push_str(&format!(
            "{:3} {:20} {:>12}\n",
            i,
            display_name(&ub.user.name),
            format_amount(ub.balance.value, symbol)
        ));
    }

    let total: f64 = balances.iter().map(|b| b.balance.value).sum();
    output.push_str(&"-".repeat(37));
    output.push('\n');
    output.push_str(&format!(
        "{:3} {:20} {:>12}\n",
        "",
        "Total",
        format_amount(total, symbol)
    ));

    output
}

/// Format registered users
pub fn format_user_list(users: &[User]) -> String {
    if users.is_empty() {
        return "No registered users. Run 'sheet-ledger users sync' first.\n".to_string();
    }

    let mut output = String::new();
    for user in users {
        let id = user.id.map(|id| id.to_string()).unwrap_or_default();
        output.push_str(&format!("{:40} {}\n", id, user.name));
    }
    output
}

fn display_name(name: &str) -> &str {
    if name.is_empty() {
        "(no name)"
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;

    #[test]
    fn test_balance_list() {
        let balances = vec![UserBalance::new("Bob", -12.5), UserBalance::new("", 20.0)];
        let output = format_balance_list(&balances, "$");

        assert!(output.contains("Bob"));
        assert!(output.contains("-$12.50"));
        assert!(output.contains("(no name)"));
        assert!(output.contains("$7.50"));
    }

    #[test]
    fn test_empty_balance_list() {
        assert_eq!(format_balance_list(&[], "$"), "No users found.\n");
    }

    #[test]
    fn test_user_list() {
        let id = UserId::new();
        let output = format_user_list(&[User::registered(id, "Carol")]);
        assert!(output.contains(&id.to_string()));
        assert!(output.contains("Carol"));
    }
}
