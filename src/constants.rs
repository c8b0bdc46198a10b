/// League points for a win
pub const POINTS_FOR_WIN: i32 = 2;

/// League points for a loss on the court
pub const POINTS_FOR_LOSS: i32 = 1;

/// League points for a walkover (forfeit) loss
pub const POINTS_FOR_WALKOVER_LOSS: i32 = 0;

/// Points per made shot, by shot type
pub const TWO_POINT_VALUE: i32 = 2;
pub const THREE_POINT_VALUE: i32 = 3;
pub const FREE_THROW_VALUE: i32 = 1;

/// Sort key for roster entries without a usable jersey number
pub const UNNUMBERED_JERSEY: i32 = 999;
