//! # Clock（時刻プロバイダ）
//!
//! お問い合わせの受付日時は、事業所（アデレード）の現地時刻でメール本文に載せる。
//! 南オーストラリアは夏時間で UTC+9:30 / +10:30 が切り替わるため、
//! オフセットを固定せず `chrono-tz` のタイムゾーンで変換する。
//!
//! テストでは [`FixedClock`] で受付時刻を固定する。

use chrono::{DateTime, Utc};
use chrono_tz::{Australia::Adelaide, Tz};

/// 事業所の所在地タイムゾーン
pub const BUSINESS_TIME_ZONE: Tz = Adelaide;

/// 時刻の取得元
pub trait Clock: Send + Sync {
    /// 現在時刻（UTC）
    fn now(&self) -> DateTime<Utc>;

    /// 現在時刻（事業所の現地時刻）
    fn business_now(&self) -> DateTime<Tz> {
        self.now().with_timezone(&BUSINESS_TIME_ZONE)
    }
}

/// OS の時計
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 常に同じ受付時刻を返す
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Timelike};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_system_clockの現地時刻はutcと同じ瞬間を指す() {
        let before = Utc::now();
        let local = SystemClock.business_now();
        let after = Utc::now();

        assert!(local >= before);
        assert!(local <= after);
    }

    #[test]
    fn test_夏時間中はutcプラス10時間30分() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 10, 19, 4, 0, 0).unwrap());

        let local = clock.business_now();

        assert_eq!((local.hour(), local.minute()), (14, 30));
        assert_eq!(local.offset().to_string(), "ACDT");
    }

    #[test]
    fn test_標準時間中はutcプラス9時間30分() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 6, 15, 4, 0, 0).unwrap());

        let local = clock.business_now();

        assert_eq!((local.hour(), local.minute()), (13, 30));
        assert_eq!(local.offset().to_string(), "ACST");
    }

    #[test]
    fn test_fixed_clockは何度呼んでも同じ時刻を返す() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 4, 0, 0).unwrap();
        let clock = FixedClock::new(at);

        assert_eq!(clock.now(), at);
        assert_eq!(clock.now(), at);
    }
}
