use serde_json::{json, Value};

use shared_config::AppConfig;

/// Knobs the test suites tweak, with everything else pinned to fast values.
pub struct TestConfig {
    pub base_url: String,
    pub reconcile_delay_ms: u64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            reconcile_delay_ms: 10,
        }
    }
}

impl TestConfig {
    pub fn for_server(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Self::default() }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            api_base_url: self.base_url.clone(),
            request_timeout_secs: 5,
            reconcile_delay_ms: self.reconcile_delay_ms,
            session_file: None,
        }
    }
}

/// Canned backend bodies shared by the cell test suites.
pub struct MockBackendResponses;

impl MockBackendResponses {
    pub fn envelope(data: Value) -> Value {
        json!({ "success": true, "data": data })
    }

    pub fn error_envelope(message: &str) -> Value {
        json!({ "success": false, "error": message })
    }

    pub fn slot(
        id: i64,
        doctor_id: i64,
        date: &str,
        time_slot: &str,
        current_patients: i64,
        max_patients: i64,
    ) -> Value {
        json!({
            "id": id,
            "doctorId": doctor_id,
            "doctorName": format!("Dr. {}", doctor_id),
            "doctorTitle": "BS.CKI",
            "specialtyId": 1,
            "date": date,
            "timeSlot": time_slot,
            "room": "P.205",
            "building": "A",
            "maxPatients": max_patients,
            "currentPatients": current_patients,
            "createdAt": "2025-01-06T08:00:00Z",
            "updatedAt": "2025-01-06T08:00:00Z"
        })
    }

    /// Group body with the three totals derived from the slots, the way the
    /// backend reports them.
    pub fn group(date: &str, doctor_id: i64, slots: &[Value]) -> Value {
        let total_patients: i64 =
            slots.iter().filter_map(|s| s["currentPatients"].as_i64()).sum();
        let total_max: i64 = slots.iter().filter_map(|s| s["maxPatients"].as_i64()).sum();
        json!({
            "date": date,
            "doctorId": doctor_id,
            "doctorName": format!("Dr. {}", doctor_id),
            "doctorTitle": "BS.CKI",
            "specialtyId": 1,
            "room": "P.205",
            "building": "A",
            "appointments": slots,
            "totalSlots": slots.len(),
            "totalPatients": total_patients,
            "totalMaxPatients": total_max
        })
    }

    pub fn grouped_page(groups: &[Value]) -> Value {
        json!({
            "content": groups,
            "totalElements": groups.len(),
            "totalPages": 1,
            "size": 10,
            "number": 0,
            "first": true,
            "last": true,
            "numberOfElements": groups.len(),
            "empty": groups.is_empty()
        })
    }

    pub fn available_slot(
        appointment_id: Option<i64>,
        doctor_id: i64,
        specialty: Option<(i64, &str)>,
        room: Option<&str>,
        time_slot: &str,
        available_count: i64,
    ) -> Value {
        json!({
            "appointmentId": appointment_id,
            "doctorId": doctor_id,
            "doctorName": format!("Dr. {}", doctor_id),
            "doctorTitle": "BS.CKI",
            "specialtyId": specialty.map(|(id, _)| id),
            "specialty": specialty.map(|(_, name)| name),
            "timeSlot": time_slot,
            "room": room,
            "building": room.map(|_| "A"),
            "availableCount": available_count,
            "currentPatients": 20 - available_count,
            "maxPatients": 20
        })
    }

    pub fn booking(id: i64, status: &str) -> Value {
        json!({
            "id": id,
            "userId": 9,
            "patientId": null,
            "patientName": "Nguyễn Văn An",
            "appointmentId": 31,
            "doctorId": 4,
            "doctorName": "Dr. 4",
            "doctorTitle": "BS.CKI",
            "specialtyId": 1,
            "specialtyName": "Nội tổng quát",
            "symptoms": "đau đầu",
            "bookingCode": format!("BK-{:06}", id),
            "queueNumber": "12",
            "status": status,
            "examinationDate": "2025-03-10",
            "examinationTime": "08:30",
            "room": "P.205",
            "building": "A",
            "createdAt": "2025-03-01T04:00:00Z",
            "updatedAt": "2025-03-01T04:00:00Z"
        })
    }

    pub fn queue_info(booking_code: &str, queue_number: &str, waiting: i64) -> Value {
        json!({
            "bookingCode": booking_code,
            "queueNumber": queue_number,
            "waitingCount": waiting,
            "examinationDate": "2025-03-10",
            "examinationTime": "08:30",
            "room": "P.205",
            "building": "A"
        })
    }

    pub fn specialty(id: i64, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "description": "Khám và điều trị tổng quát",
            "symptoms": ["sốt", "đau đầu"]
        })
    }

    pub fn doctor(id: i64, full_name: &str, specialty_id: i64) -> Value {
        json!({
            "id": id,
            "fullName": full_name,
            "title": "BS.CKI",
            "specialtyId": specialty_id,
            "room": "P.205",
            "building": "A"
        })
    }

    pub fn paginated(data: &[Value], total: i64, page: i64, page_size: i64) -> Value {
        let total_pages = if page_size > 0 { (total + page_size - 1) / page_size } else { 0 };
        json!({
            "data": data,
            "pagination": {
                "total": total,
                "page": page,
                "pageSize": page_size,
                "totalPages": total_pages
            }
        })
    }
}
