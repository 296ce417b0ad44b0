//! 診断テキスト出力の整形
//!
//! フォアグラウンドが人間向けの診断行を組み立てるためのヘルパです。
//! 出力先（UART/USBなど）は[`crate::interface::DiagnosticSink`]の
//! 実装が決めます。容量不足による整形失敗はベストエフォートで無視
//! されます（診断経路は制御に影響しません）。

use core::fmt::Write;

use heapless::String;

use crate::control::learning::SweepPoint;
use crate::state::DriveSnapshot;

/// 診断行バッファの容量 [byte]
pub const LINE_CAPACITY: usize = 192;

/// 副ストリーム（USB側）へ周期送出する固定文字列
pub const GREETING: &str = "Hello World! (from USB)\r\n";

const RAD_S_TO_RPM: f32 = 60.0 / core::f32::consts::TAU;

/// トルクモードのステータス行を整形する
///
/// バス電圧、逆起電力の大きさ、制御器出力の大きさ、d/q電流、機械回転数
/// [RPM]、追従フラグ、ボタン生状態をタブ区切りで並べます。
pub fn status_line(snapshot: &DriveSnapshot, enter_pressed: bool) -> String<LINE_CAPACITY> {
    let mut line = String::new();
    let _ = write!(
        line,
        "{:.2} V\t{:.2}\t{:.2} V\t{:.2} A\t{:.2} A\t{:.2} RPM\t{}\t{}",
        snapshot.vbus,
        snapshot.emf_magnitude,
        snapshot.regulator_magnitude,
        snapshot.iphase_dq.d,
        snapshot.iphase_dq.q,
        snapshot.mechanical_velocity * RAD_S_TO_RPM,
        snapshot.tracking as u8,
        enter_pressed as u8,
    );
    line
}

/// 学習スイープ1点の結果行を整形する
pub fn sweep_line(point: &SweepPoint) -> String<LINE_CAPACITY> {
    let mut line = String::new();
    let _ = write!(
        line,
        "{:.2} V, {:.1} rad/s: Id = {:.3} Iq = {:.3} dId = {:.2} dIq = {:.2}",
        point.volt_target,
        point.speed_target,
        point.idq_mean.d,
        point.idq_mean.q,
        point.idq_slope_mean.d,
        point.idq_slope_mean.q,
    );
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foc::DqVector;

    #[test]
    fn test_status_line_content() {
        let mut snap = DriveSnapshot::new();
        snap.vbus = 16.25;
        snap.iphase_dq = DqVector::new(0.1, 0.75);
        snap.mechanical_velocity = core::f32::consts::TAU; // 1回転/s = 60RPM
        snap.tracking = true;

        let line = status_line(&snap, false);
        assert!(line.starts_with("16.25 V\t"));
        assert!(line.contains("60.00 RPM"));
        assert!(line.ends_with("\t1\t0"));
    }

    #[test]
    fn test_sweep_line_content() {
        let point = SweepPoint {
            volt_target: 0.4,
            speed_target: 2000.0,
            idq_mean: DqVector::new(0.123, -0.045),
            idq_slope_mean: DqVector::new(1.5, -2.25),
        };

        let line = sweep_line(&point);
        assert!(line.starts_with("0.40 V, 2000.0 rad/s:"));
        assert!(line.contains("Id = 0.123"));
        assert!(line.contains("dIq = -2.25"));
    }

    #[test]
    fn test_lines_fit_capacity() {
        // 極端な値でも容量内に収まり、途中で切れない
        let mut snap = DriveSnapshot::new();
        snap.vbus = -99999.99;
        snap.emf_magnitude = 123456.78;
        snap.regulator_magnitude = -98765.4;
        snap.iphase_dq = DqVector::new(-12345.6, 12345.6);
        snap.mechanical_velocity = 1.0e6;
        let line = status_line(&snap, true);
        assert!(line.len() < LINE_CAPACITY);
        assert!(line.ends_with("\t0\t1"));
    }
}
