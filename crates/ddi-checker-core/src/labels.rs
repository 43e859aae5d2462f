//! Fixed display strings (Thai, as shown on the checker page).

pub const NO_DRUGS_FOUND: &str = "ไม่พบยา";
pub const SEARCH_FAILED: &str = "ข้อผิดพลาดในการดึงข้อมูล";
pub const NO_INTERACTIONS: &str = "ไม่พบปฏิกิริยายาที่มีนัยสำคัญ";
pub const CHECK_FAILED: &str = "เกิดข้อผิดพลาดในการตรวจสอบปฏิกิริยา";
pub const DESCRIPTION_HEADING: &str = "คำอธิบาย:";
pub const ENGLISH_HEADING: &str = "English:";

pub const STATUS_CONNECTED: &str = "เชื่อมต่อแล้ว";
pub const STATUS_ERROR: &str = "ข้อผิดพลาด";
pub const STATUS_UNKNOWN: &str = "กำลังตรวจสอบ...";
