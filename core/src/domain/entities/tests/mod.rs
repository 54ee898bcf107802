mod blood_request_tests;
mod donation_tests;
mod passport_certificate_tests;
mod registration_schedule_tests;
