//! # テスト用モックリポジトリ
//!
//! ハンドラ・ユースケースのテストで使用するインメモリリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! academy-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! MongoDB の挙動のうち、サーバーが依存しているもの（等価フィルタ、
//! `borough` 昇順 → `_id` 降順のソート、upsert の結果）だけを再現する。

use std::{
    cmp::Ordering,
    sync::{Arc, Mutex},
};

use academy_domain::{
    booking::{self, Booking},
    course::{Course, CourseSummary},
    id::DocumentId,
    notice::{NOTICE_FOR_FIELD, Notice},
    record::{BOROUGH_FIELD, Record},
    user::{EMAIL_FIELD, ROLE_FIELD, Role, User},
};
use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::{
    db::DatabaseProbe,
    error::InfraError,
    repository::{
        BookingRepository,
        CourseRepository,
        DeleteAck,
        InsertAck,
        NoticeRepository,
        UpdateAck,
        UserRepository,
    },
};

// ===== 共通のインメモリコレクション =====

#[derive(Clone, Default)]
struct InMemoryCollection {
    records: Arc<Mutex<Vec<Record>>>,
}

impl InMemoryCollection {
    fn insert(&self, record: &Record) -> InsertAck {
        let id = record.id().unwrap_or_default();
        self.records
            .lock()
            .unwrap()
            .push(record.clone().with_id(id));
        InsertAck { inserted_id: id }
    }

    fn all(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }

    fn find_by_id(&self, id: &DocumentId) -> Option<Record> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id().as_ref() == Some(id))
            .cloned()
    }

    fn filter_by(&self, field: &str, value: Option<&str>) -> Vec<Record> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| value.is_none_or(|v| r.get_str(field) == Some(v)))
            .cloned()
            .collect()
    }

    fn delete(&self, id: &DocumentId) -> DeleteAck {
        let mut records = self.records.lock().unwrap();
        match records.iter().position(|r| r.id().as_ref() == Some(id)) {
            Some(pos) => {
                records.remove(pos);
                DeleteAck { deleted_count: 1 }
            }
            None => DeleteAck { deleted_count: 0 },
        }
    }

    /// 条件に一致する最初のドキュメントの文字列フィールドを設定する
    ///
    /// 戻り値は (一致件数, 変更件数)。
    fn set_str_where(
        &self,
        predicate: impl Fn(&Record) -> bool,
        key: &str,
        value: &str,
    ) -> (u64, u64) {
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| predicate(r)) {
            Some(record) => {
                let modified = u64::from(record.get_str(key) != Some(value));
                record.set_str(key, value);
                (1, modified)
            }
            None => (0, 0),
        }
    }
}

/// 一覧のソート順（`borough` 昇順 → `_id` 降順）
///
/// MongoDB と同様に、`borough` を持たないドキュメントを先頭に並べる。
fn listing_order(a: &Record, b: &Record) -> Ordering {
    a.get_str(BOROUGH_FIELD)
        .cmp(&b.get_str(BOROUGH_FIELD))
        .then_with(|| b.id().cmp(&a.id()))
}

fn sorted_for_listing(mut records: Vec<Record>) -> Vec<Record> {
    records.sort_by(listing_order);
    records
}

// ===== MockUserRepository =====

#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: InMemoryCollection,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// JSON からユーザーを登録し、採番した ID を返す
    pub fn add(&self, value: Value) -> DocumentId {
        let user = User::try_from(value).expect("テストデータは JSON オブジェクトであること");
        self.users.insert(user.as_record()).inserted_id
    }

    /// 保存されている全ユーザー
    pub fn all(&self) -> Vec<User> {
        self.users.all().into_iter().map(User::from_record).collect()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_all(&self, role: Option<&str>) -> Result<Vec<User>, InfraError> {
        Ok(self
            .users
            .filter_by(ROLE_FIELD, role)
            .into_iter()
            .map(User::from_record)
            .collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, InfraError> {
        Ok(self
            .users
            .filter_by(EMAIL_FIELD, Some(email))
            .into_iter()
            .next()
            .map(User::from_record))
    }

    async fn insert(&self, user: &User) -> Result<InsertAck, InfraError> {
        Ok(self.users.insert(user.as_record()))
    }

    async fn upsert_role(&self, email: &str, role: Role) -> Result<UpdateAck, InfraError> {
        let (matched_count, modified_count) = self.users.set_str_where(
            |r| r.get_str(EMAIL_FIELD) == Some(email),
            ROLE_FIELD,
            role.as_ref(),
        );
        if matched_count > 0 {
            return Ok(UpdateAck {
                matched_count,
                modified_count,
                upserted_id: None,
            });
        }

        let mut fields = Map::new();
        fields.insert(EMAIL_FIELD.to_string(), Value::String(email.to_string()));
        fields.insert(ROLE_FIELD.to_string(), Value::String(role.to_string()));
        let ack = self.users.insert(&Record::new(fields));

        Ok(UpdateAck {
            matched_count:  0,
            modified_count: 0,
            upserted_id:    Some(ack.inserted_id),
        })
    }
}

// ===== MockCourseRepository =====

#[derive(Clone, Default)]
pub struct MockCourseRepository {
    courses: InMemoryCollection,
}

impl MockCourseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, value: Value) -> DocumentId {
        let course = Course::try_from(value).expect("テストデータは JSON オブジェクトであること");
        self.courses.insert(course.as_record()).inserted_id
    }

    pub fn all(&self) -> Vec<Course> {
        self.courses
            .all()
            .into_iter()
            .map(Course::from_record)
            .collect()
    }
}

#[async_trait]
impl CourseRepository for MockCourseRepository {
    async fn find_all(&self) -> Result<Vec<Course>, InfraError> {
        Ok(self.all())
    }

    async fn find_summaries(&self) -> Result<Vec<CourseSummary>, InfraError> {
        Ok(self.all().iter().map(Course::summary).collect())
    }

    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Course>, InfraError> {
        Ok(self.courses.find_by_id(id).map(Course::from_record))
    }

    async fn insert(&self, course: &Course) -> Result<InsertAck, InfraError> {
        Ok(self.courses.insert(course.as_record()))
    }

    async fn delete(&self, id: &DocumentId) -> Result<DeleteAck, InfraError> {
        Ok(self.courses.delete(id))
    }
}

// ===== MockBookingRepository =====

#[derive(Clone, Default)]
pub struct MockBookingRepository {
    bookings: InMemoryCollection,
}

impl MockBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, value: Value) -> DocumentId {
        let booking = Booking::try_from(value).expect("テストデータは JSON オブジェクトであること");
        self.bookings.insert(booking.as_record()).inserted_id
    }

    pub fn all(&self) -> Vec<Booking> {
        self.bookings
            .all()
            .into_iter()
            .map(Booking::from_record)
            .collect()
    }
}

#[async_trait]
impl BookingRepository for MockBookingRepository {
    async fn find_all(&self, email: Option<&str>) -> Result<Vec<Booking>, InfraError> {
        let records = self.bookings.filter_by(booking::EMAIL_FIELD, email);
        Ok(sorted_for_listing(records)
            .into_iter()
            .map(Booking::from_record)
            .collect())
    }

    async fn find_by_status(&self, status: &str) -> Result<Vec<Booking>, InfraError> {
        Ok(self
            .bookings
            .filter_by(booking::STATUS_FIELD, Some(status))
            .into_iter()
            .map(Booking::from_record)
            .collect())
    }

    async fn find_latest_by_email(&self, email: &str) -> Result<Option<Booking>, InfraError> {
        Ok(self
            .bookings
            .filter_by(booking::EMAIL_FIELD, Some(email))
            .into_iter()
            .max_by_key(Record::id)
            .map(Booking::from_record))
    }

    async fn insert(&self, booking: &Booking) -> Result<InsertAck, InfraError> {
        Ok(self.bookings.insert(booking.as_record()))
    }

    async fn approve(&self, id: &DocumentId) -> Result<UpdateAck, InfraError> {
        let (matched_count, modified_count) = self.bookings.set_str_where(
            |r| r.id().as_ref() == Some(id),
            booking::STATUS_FIELD,
            booking::APPROVED,
        );
        Ok(UpdateAck {
            matched_count,
            modified_count,
            upserted_id: None,
        })
    }

    async fn delete(&self, id: &DocumentId) -> Result<DeleteAck, InfraError> {
        Ok(self.bookings.delete(id))
    }
}

// ===== MockNoticeRepository =====

#[derive(Clone, Default)]
pub struct MockNoticeRepository {
    notices: InMemoryCollection,
}

impl MockNoticeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, value: Value) -> DocumentId {
        let notice = Notice::try_from(value).expect("テストデータは JSON オブジェクトであること");
        self.notices.insert(notice.as_record()).inserted_id
    }

    pub fn all(&self) -> Vec<Notice> {
        self.notices
            .all()
            .into_iter()
            .map(Notice::from_record)
            .collect()
    }
}

#[async_trait]
impl NoticeRepository for MockNoticeRepository {
    async fn find_all(&self, notice_for: Option<&str>) -> Result<Vec<Notice>, InfraError> {
        let records = self.notices.filter_by(NOTICE_FOR_FIELD, notice_for);
        Ok(sorted_for_listing(records)
            .into_iter()
            .map(Notice::from_record)
            .collect())
    }

    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Notice>, InfraError> {
        Ok(self.notices.find_by_id(id).map(Notice::from_record))
    }

    async fn insert(&self, notice: &Notice) -> Result<InsertAck, InfraError> {
        Ok(self.notices.insert(notice.as_record()))
    }

    async fn delete(&self, id: &DocumentId) -> Result<DeleteAck, InfraError> {
        Ok(self.notices.delete(id))
    }
}

// ===== MockDatabaseProbe =====

/// 死活確認の結果を固定で返すプローブ
#[derive(Clone)]
pub struct MockDatabaseProbe {
    healthy: bool,
}

impl MockDatabaseProbe {
    pub fn healthy() -> Self {
        Self { healthy: true }
    }

    pub fn unhealthy() -> Self {
        Self { healthy: false }
    }
}

#[async_trait]
impl DatabaseProbe for MockDatabaseProbe {
    async fn ping(&self) -> Result<(), InfraError> {
        if self.healthy {
            Ok(())
        } else {
            Err(InfraError::unexpected("データベースに接続できません"))
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_一覧は地区昇順かつ新しい順に並ぶ() {
        let repo = MockBookingRepository::new();
        let old_b = repo.add(json!({ "borough": "B", "email": "x" }));
        let a = repo.add(json!({ "borough": "A", "email": "x" }));
        let new_b = repo.add(json!({ "borough": "B", "email": "x" }));
        let none = repo.add(json!({ "email": "x" }));

        let ids: Vec<_> = repo
            .find_all(None)
            .await
            .unwrap()
            .iter()
            .filter_map(Booking::id)
            .collect();

        assert_eq!(ids, vec![none, a, new_b, old_b]);
    }

    #[tokio::test]
    async fn test_upsert_roleは存在しないユーザーを作成する() {
        let repo = MockUserRepository::new();

        let ack = repo.upsert_role("new@x.com", Role::Student).await.unwrap();

        assert_eq!(ack.matched_count, 0);
        assert!(ack.upserted_id.is_some());
        let user = repo.find_by_email("new@x.com").await.unwrap().unwrap();
        assert!(user.has_role(Role::Student));
    }

    #[tokio::test]
    async fn test_upsert_roleは同じロールなら変更件数0() {
        let repo = MockUserRepository::new();
        repo.add(json!({ "email": "a@x.com", "role": "student" }));

        let ack = repo.upsert_role("a@x.com", Role::Student).await.unwrap();

        assert_eq!(ack.matched_count, 1);
        assert_eq!(ack.modified_count, 0);
        assert_eq!(ack.upserted_id, None);
    }

    #[tokio::test]
    async fn test_最新の予約はidが最大のもの() {
        let repo = MockBookingRepository::new();
        repo.add(json!({ "email": "a@x.com", "courseId": "c1" }));
        let latest = repo.add(json!({ "email": "a@x.com", "courseId": "c2" }));

        let booking = repo.find_latest_by_email("a@x.com").await.unwrap().unwrap();

        assert_eq!(booking.id(), Some(latest));
        assert_eq!(booking.course_id(), Some("c2"));
    }

    #[tokio::test]
    async fn test_お知らせは対象で完全一致に絞り込み地区順に並ぶ() {
        let repo = MockNoticeRepository::new();
        let queens = repo.add(json!({ "noticeFor": "c1", "borough": "Queens" }));
        repo.add(json!({ "noticeFor": "C1", "borough": "Bronx" }));
        let bronx = repo.add(json!({ "noticeFor": "c1", "borough": "Bronx" }));

        let ids: Vec<_> = repo
            .find_all(Some("c1"))
            .await
            .unwrap()
            .iter()
            .filter_map(Notice::id)
            .collect();

        assert_eq!(ids, vec![bronx, queens]);
        assert_eq!(repo.find_all(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_ロール絞り込みは保存値の文字列と完全一致する() {
        let repo = MockUserRepository::new();
        repo.add(json!({ "email": "i@x.com", "role": "instructor" }));
        repo.add(json!({ "email": "a@x.com", "role": "admin" }));

        let users = repo.find_all(Some("instructor")).await.unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email(), Some("i@x.com"));
    }
}
