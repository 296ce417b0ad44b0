//! 割り込みとフォアグラウンド間の共有状態
//!
//! 割り込み側が1キャリア周期ごとにスナップショットを丸ごと公開し、
//! フォアグラウンド側は目標値とモード遷移を要求セル経由で渡します。
//! 要求セルは割り込みがダウンカウント相の先頭で`take`して消費します。
//! 全セルはクリティカルセクションで保護され、部分更新は起こりません。

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::control::mode::{ControlMode, ModeRequest};
use crate::foc::DqVector;

/// 割り込みが毎周期公開する観測値一式
#[derive(Debug, Clone, Copy)]
pub struct DriveSnapshot {
    /// 回転座標系の相電流 [A]
    pub iphase_dq: DqVector,
    /// 回転座標系の相電流スロープ [A/s]
    pub iphase_dq_slope: DqVector,
    /// バス電圧 [V]
    pub vbus: f32,
    /// 現在の動作モード
    pub mode: ControlMode,
    /// 安全ゲートの駆動許可フラグ
    pub enabled: bool,
    /// 推定器の追従フラグ
    pub tracking: bool,
    /// 推定器の電気角速度 [rad/s]
    pub electrical_velocity: f32,
    /// 推定器の機械角速度 [rad/s]
    pub mechanical_velocity: f32,
    /// 逆起電力ベクトルの大きさ
    pub emf_magnitude: f32,
    /// 電流制御器の出力電圧の大きさ [V]
    pub regulator_magnitude: f32,
    /// センシング更新失敗の累積回数（助言のみ）
    pub sample_faults: u32,
}

impl DriveSnapshot {
    pub const fn new() -> Self {
        Self {
            iphase_dq: DqVector::ZERO,
            iphase_dq_slope: DqVector::ZERO,
            vbus: 0.0,
            mode: ControlMode::Torque,
            enabled: false,
            tracking: false,
            electrical_velocity: 0.0,
            mechanical_velocity: 0.0,
            emf_magnitude: 0.0,
            regulator_magnitude: 0.0,
            sample_faults: 0,
        }
    }
}

impl Default for DriveSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

type SharedCell<T> = Mutex<CriticalSectionRawMutex, Cell<T>>;

/// 共有状態の束
///
/// ファームウェアは[`DRIVE_STATE`]を使い、テストはローカルに生成します。
pub struct SharedState {
    snapshot: SharedCell<DriveSnapshot>,
    torque_target: SharedCell<DqVector>,
    openloop_target: SharedCell<DqVector>,
    mode_request: SharedCell<Option<ModeRequest>>,
    sim_velocity_request: SharedCell<Option<f32>>,
}

impl SharedState {
    pub const fn new() -> Self {
        Self {
            snapshot: Mutex::new(Cell::new(DriveSnapshot::new())),
            torque_target: Mutex::new(Cell::new(DqVector::ZERO)),
            openloop_target: Mutex::new(Cell::new(DqVector::ZERO)),
            mode_request: Mutex::new(Cell::new(None)),
            sim_velocity_request: Mutex::new(Cell::new(None)),
        }
    }

    /// 観測値一式を丸ごと公開する（割り込み側）
    pub fn publish_snapshot(&self, snapshot: DriveSnapshot) {
        self.snapshot.lock(|cell| cell.set(snapshot));
    }

    /// 最新の観測値一式を読む（フォアグラウンド側）
    pub fn snapshot(&self) -> DriveSnapshot {
        self.snapshot.lock(|cell| cell.get())
    }

    /// トルクモードの電流目標を設定する [A]
    pub fn set_torque_target(&self, target: DqVector) {
        self.torque_target.lock(|cell| cell.set(target));
    }

    pub fn torque_target(&self) -> DqVector {
        self.torque_target.lock(|cell| cell.get())
    }

    /// 学習モードの開ループ電圧目標を設定する [V]
    pub fn set_openloop_target(&self, target: DqVector) {
        self.openloop_target.lock(|cell| cell.set(target));
    }

    pub fn openloop_target(&self) -> DqVector {
        self.openloop_target.lock(|cell| cell.get())
    }

    /// モード遷移を要求する（後勝ち）
    pub fn request_mode(&self, request: ModeRequest) {
        self.mode_request.lock(|cell| cell.set(Some(request)));
    }

    /// 保留中のモード遷移要求を取り出す（割り込み側）
    pub fn take_mode_request(&self) -> Option<ModeRequest> {
        self.mode_request.lock(|cell| cell.take())
    }

    /// 合成角度ソースの電気角速度を要求する [rad/s]
    pub fn request_sim_velocity(&self, velocity: f32) {
        self.sim_velocity_request.lock(|cell| cell.set(Some(velocity)));
    }

    /// 保留中の合成角速度要求を取り出す（割り込み側）
    pub fn take_sim_velocity_request(&self) -> Option<f32> {
        self.sim_velocity_request.lock(|cell| cell.take())
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

/// ファームウェア用のグローバル共有状態
pub static DRIVE_STATE: SharedState = SharedState::new();
