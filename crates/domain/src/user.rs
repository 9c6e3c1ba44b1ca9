//! # ユーザー
//!
//! サインアップ時に登録されるユーザーと、その役割（ロール）を定義する。
//!
//! ロールは保存されるだけで、サーバー側では認可に使用しない。
//! クライアントはロール判定 API の結果を見て画面を出し分ける。

use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::DomainError;

/// メールアドレスのフィールド名
pub const EMAIL_FIELD: &str = "email";
/// ロールのフィールド名
pub const ROLE_FIELD: &str = "role";

define_record! {
    /// ユーザー
    ///
    /// `email` は一意であることを想定しているが、サーバーは強制しない。
    pub struct User;
}

impl User {
    pub fn email(&self) -> Option<&str> {
        self.0.get_str(EMAIL_FIELD)
    }

    /// 保存されたロール文字列（未設定なら `None`）
    pub fn role_name(&self) -> Option<&str> {
        self.0.get_str(ROLE_FIELD)
    }

    /// 保存されたロール（未設定または未知の値なら `None`）
    pub fn role(&self) -> Option<Role> {
        self.role_name().and_then(|name| name.parse().ok())
    }

    /// 保存されたロールが指定ロールと完全一致するか
    pub fn has_role(&self, role: Role) -> bool {
        self.role_name() == Some(role.as_ref())
    }
}

/// ユーザーのロール
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    /// 管理者（予約の承認、講座・お知らせの管理）
    Admin,
    /// 受講生（予約が承認済み）
    Student,
    /// 一般ユーザー（サインアップ直後）
    User,
}

impl Role {
    /// ロール名をパースする
    ///
    /// 大文字小文字を区別する（保存値との完全一致で判定するため）。
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        value
            .parse()
            .map_err(|_| DomainError::Validation(format!("未知のロールです: {value}")))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;
    use strum::IntoEnumIterator;

    use super::*;

    fn user_with(value: serde_json::Value) -> User {
        User::try_from(value).unwrap()
    }

    #[rstest]
    #[case("admin", Role::Admin)]
    #[case("student", Role::Student)]
    #[case("user", Role::User)]
    fn test_ロール名をパースできる(#[case] input: &str, #[case] expected: Role) {
        assert_eq!(Role::parse(input), Ok(expected));
        assert_eq!(expected.to_string(), input);
    }

    #[rstest]
    #[case("Admin")]
    #[case("instructor")]
    #[case("")]
    fn test_未知のロール名はvalidationエラー(#[case] input: &str) {
        assert!(matches!(Role::parse(input), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_has_roleは保存値と完全一致の場合のみtrue() {
        let admin = user_with(json!({ "email": "a@example.com", "role": "admin" }));

        assert!(admin.has_role(Role::Admin));
        assert!(!admin.has_role(Role::Student));
        assert!(!admin.has_role(Role::User));
    }

    #[test]
    fn test_ロール未設定のユーザーはどのロールにも該当しない() {
        let user = user_with(json!({ "email": "a@example.com" }));

        assert_eq!(user.role(), None);
        assert!(Role::iter().all(|role| !user.has_role(role)));
    }

    #[test]
    fn test_大文字のロールは一致しない() {
        let user = user_with(json!({ "email": "a@example.com", "role": "Admin" }));

        assert_eq!(user.role(), None);
        assert!(!user.has_role(Role::Admin));
    }
}
