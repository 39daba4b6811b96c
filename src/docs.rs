use crate::model::gem_purchase::{GemPurchase, GemPurchaseFields};
use crate::model::ltc_record::{LtcRecord, LtcRecordFields};
use crate::model::medical_claim::{MedicalClaim, MedicalClaimFields};
use crate::model::salary::{Salary, SalaryFields};
use crate::model::{ClaimType, Record, RecordCategory, RecordFields};
use crate::models::{CreatedResponse, LoginReqDto, LoginResponse, MessageResponse};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Finance Portal API",
        version = "0.1.0",
        description = r#"
## Finance Records Portal

Record keeping for four finance desks. Each desk logs in with its own
account and works on a single record category:

- **salaries**: employee salary entries
- **gem_purchases**: Government e-Marketplace purchases
- **medical_claims**: medical claims and advance claims
- **ltc_records**: Leave Travel Concession reimbursements

### Login
`POST /login` returns the role (record category) for the account. No token
is issued; clients keep the role and address `/api/{role}`.

### Records
The same four operations exist for every category. Dates are calendar
dates (`YYYY-MM-DD`) without time zone. Database errors are returned as
`{"error": "..."}`.
"#,
    ),
    paths(
        crate::auth::handlers::login,

        crate::api::records::list_records,
        crate::api::records::get_record,
        crate::api::records::create_record,
        crate::api::records::update_record,
        crate::api::records::delete_record
    ),
    components(
        schemas(
            LoginReqDto,
            LoginResponse,
            MessageResponse,
            CreatedResponse,
            RecordCategory,
            ClaimType,
            Record,
            RecordFields,
            Salary,
            SalaryFields,
            GemPurchase,
            GemPurchaseFields,
            MedicalClaim,
            MedicalClaimFields,
            LtcRecord,
            LtcRecordFields
        )
    ),
    tags(
        (name = "Auth", description = "Portal login"),
        (name = "Records", description = "Generic record CRUD per category"),
    )
)]
pub struct ApiDoc;
