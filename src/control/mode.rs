//! 制御モードとモード遷移要求

/// 駆動の動作モード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlMode {
    /// 開ループ加速ランプ（合成角度で駆動）
    Startup,
    /// 閉ループ電流制御
    Torque,
    /// 速度制御（未実装スタブ、ゼロ電圧を指令）
    Velocity,
    /// 特性同定スイープ（合成角度 + 開ループ電圧）
    Learning,
}

impl ControlMode {
    /// このモードでは合成角度ソースを使用するか
    pub fn uses_simulated_angle(self) -> bool {
        matches!(self, ControlMode::Startup | ControlMode::Learning)
    }
}

/// フォアグラウンドから割り込みへのモード遷移要求
///
/// 割り込みがダウンカウント相の先頭で消費します。フォアグラウンドが
/// モードを直接書き換えることはありません。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeRequest {
    Learning,
    /// 合成角速度をゼロに初期化してランプを開始する
    Startup,
    Torque,
    Velocity,
}
