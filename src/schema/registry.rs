use crate::error::RecordError;

use super::types::{DataType, EntitySchema, FieldDescriptor};

const STUDENT_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::id(),
    FieldDescriptor::new("firstName", "First Name", DataType::Text).required(),
    FieldDescriptor::new("lastName", "Last Name", DataType::Text).required(),
    FieldDescriptor::new("email", "Email", DataType::Email).required(),
    FieldDescriptor::new("enrollmentDate", "Enrollment Date", DataType::Date).required(),
    FieldDescriptor::new("major", "Major", DataType::Text).required(),
    FieldDescriptor::new("gpa", "GPA", DataType::Number).bounded(Some(0.0), Some(4.0), Some(0.01)),
];

const COURSE_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::id(),
    FieldDescriptor::new("courseCode", "Course Code", DataType::Text).required(),
    FieldDescriptor::new("courseName", "Course Name", DataType::Text).required(),
    FieldDescriptor::new("credits", "Credits", DataType::Number)
        .required()
        .bounded(Some(1.0), Some(6.0), None),
    FieldDescriptor::new("department", "Department", DataType::Text).required(),
    FieldDescriptor::new("semester", "Semester", DataType::Select)
        .required()
        .choices(&["Fall", "Spring", "Summer"]),
    FieldDescriptor::new("description", "Description", DataType::Textarea).unsortable(),
];

const INSTRUCTOR_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::id(),
    FieldDescriptor::new("firstName", "First Name", DataType::Text).required(),
    FieldDescriptor::new("lastName", "Last Name", DataType::Text).required(),
    FieldDescriptor::new("email", "Email", DataType::Email).required(),
    FieldDescriptor::new("department", "Department", DataType::Text).required(),
    FieldDescriptor::new("title", "Title", DataType::Select)
        .required()
        .choices(&[
            "Professor",
            "Associate Professor",
            "Assistant Professor",
            "Lecturer",
            "Teaching Assistant",
        ]),
    FieldDescriptor::new("officeNumber", "Office Number", DataType::Text).unsortable(),
    FieldDescriptor::new("phone", "Phone", DataType::Tel)
        .hidden()
        .unsortable(),
];

const EMPLOYEE_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::id(),
    FieldDescriptor::new("firstName", "First Name", DataType::Text).required(),
    FieldDescriptor::new("lastName", "Last Name", DataType::Text).required(),
    FieldDescriptor::new("email", "Email", DataType::Email).required(),
    FieldDescriptor::new("position", "Position", DataType::Text).required(),
    FieldDescriptor::new("department", "Department", DataType::Text).required(),
    FieldDescriptor::new("hireDate", "Hire Date", DataType::Date).required(),
    FieldDescriptor::new("phone", "Phone", DataType::Tel)
        .hidden()
        .unsortable(),
];

/// All supported entities, in navigation order.
pub static ENTITIES: [EntitySchema; 4] = [
    EntitySchema {
        name: "students",
        title: "Students",
        subtitle: "Manage student records and information",
        fields: STUDENT_FIELDS,
    },
    EntitySchema {
        name: "courses",
        title: "Courses",
        subtitle: "Manage course catalog and schedules",
        fields: COURSE_FIELDS,
    },
    EntitySchema {
        name: "instructors",
        title: "Instructors",
        subtitle: "Manage faculty and teaching staff",
        fields: INSTRUCTOR_FIELDS,
    },
    EntitySchema {
        name: "employees",
        title: "Employees",
        subtitle: "Manage administrative and support staff",
        fields: EMPLOYEE_FIELDS,
    },
];

/// Look up the full schema of an entity.
pub fn schema_for(entity: &str) -> Result<&'static EntitySchema, RecordError> {
    ENTITIES
        .iter()
        .find(|schema| schema.name == entity)
        .ok_or_else(|| RecordError::UnknownEntity {
            name: entity.to_string(),
        })
}

/// Ordered field descriptors of an entity.
pub fn fields_for(entity: &str) -> Result<&'static [FieldDescriptor], RecordError> {
    schema_for(entity).map(|schema| schema.fields)
}

pub fn entity_names() -> impl Iterator<Item = &'static str> {
    ENTITIES.iter().map(|schema| schema.name)
}
